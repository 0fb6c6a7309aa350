//! Package fetching
//!
//! [`Fetcher`] turns a package locator into a local file. [`CachingFetcher`]
//! downloads http(s) locators into the package cache and uses local
//! locators (`file://` URLs and plain paths) in place.

pub mod hash;

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::catalog::Package;
use crate::error::{self, Result};

/// Provides local files for packages
pub trait Fetcher {
    /// Make the package bytes available locally and return their path
    fn fetch(&self, package: &Package) -> Result<PathBuf>;
}

/// Fetcher backed by an HTTP client and an on-disk cache
pub struct CachingFetcher {
    client: reqwest::blocking::Client,
    dir: PathBuf,
}

impl CachingFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("apkup/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| error::fetch::failed("http client", e.to_string()))?;
        Ok(Self {
            client,
            dir: dir.into(),
        })
    }

    /// Fetcher using the platform package cache
    pub fn default_location() -> Result<Self> {
        Self::new(crate::paths::packages_dir()?)
    }

    /// Download a URL to a destination, replacing it atomically
    pub fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let failed = |e: &dyn std::fmt::Display| error::fetch::failed(url, e.to_string());

        let dir = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| failed(&e))?;

        tracing::info!(url, dest = %dest.display(), "downloading");
        let mut response = self
            .client
            .get(url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| failed(&e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| failed(&e))?;
        response.copy_to(&mut tmp).map_err(|e| failed(&e))?;
        tmp.persist(dest).map_err(|e| failed(&e.error))?;
        Ok(())
    }

    /// Copy a locator to a destination, downloading it when it is remote
    pub fn mirror(&self, locator: &str, dest: &Path) -> Result<()> {
        let Some(source) = local_path(locator) else {
            return self.download(locator, dest);
        };
        let failed = |e: &dyn std::fmt::Display| error::fetch::failed(locator, e.to_string());

        let dir = dest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| failed(&e))?;

        let mut input = std::fs::File::open(&source).map_err(|e| failed(&e))?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| failed(&e))?;
        std::io::copy(&mut input, &mut tmp).map_err(|e| failed(&e))?;
        tmp.persist(dest).map_err(|e| failed(&e.error))?;
        Ok(())
    }

    fn fetch_remote(&self, package: &Package) -> Result<PathBuf> {
        let dest = self.dir.join(package.file_name());

        if dest.is_file() {
            if let Some(expected) = &package.hash {
                if hash::file_matches(&dest, expected)? {
                    tracing::debug!(path = %dest.display(), "using cached package");
                    return Ok(dest);
                }
            }
        }

        self.download(&package.locator, &dest)?;
        verify(package, &dest)?;
        Ok(dest)
    }
}

/// Path of a locator that refers to the local file system
fn local_path(locator: &str) -> Option<PathBuf> {
    if let Some(path) = locator.strip_prefix("file://") {
        return Some(PathBuf::from(path));
    }
    if locator.contains("://") {
        return None;
    }
    Some(PathBuf::from(locator))
}

fn verify(package: &Package, path: &Path) -> Result<()> {
    if let Some(expected) = &package.hash {
        if !hash::file_matches(path, expected)? {
            return Err(error::fetch::hash_mismatch(path.display().to_string()));
        }
    }
    Ok(())
}

impl Fetcher for CachingFetcher {
    fn fetch(&self, package: &Package) -> Result<PathBuf> {
        match local_path(&package.locator) {
            Some(path) => {
                if !path.is_file() {
                    return Err(error::fetch::failed(&package.locator, "file not found"));
                }
                verify(package, &path)?;
                Ok(path)
            }
            None => self.fetch_remote(package),
        }
    }
}
