//! Configuration and cache path resolution
//!
//! Uses the platform's standard locations (XDG on Linux, Library on macOS)
//! with an `apkup` subdirectory. Both can be overridden through environment
//! variables, which the integration tests rely on.

use std::path::PathBuf;

use crate::error::{ApkupError, Result};

/// Directory name under the user's config and cache directories
const APP_DIR: &str = "apkup";

/// Configuration file name within the config directory
pub const CONFIG_FILE: &str = "config.yaml";

/// Repository index subdirectory within the cache
pub const REPOS_DIR: &str = "repos";

/// Downloaded packages subdirectory within the cache
pub const PACKAGES_DIR: &str = "packages";

/// Catalog document name within a repository cache directory
pub const INDEX_FILE: &str = "index.json";

/// Get the configuration directory path
///
/// Can be overridden with the `APKUP_CONFIG_DIR` environment variable.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("APKUP_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::config_dir().ok_or_else(|| ApkupError::NoDirectory {
        kind: "config".to_string(),
    })?;

    Ok(base.join(APP_DIR))
}

/// Get the configuration file path
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE))
}

/// Get the cache directory path
///
/// Can be overridden with the `APKUP_CACHE_DIR` environment variable.
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("APKUP_CACHE_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::cache_dir().ok_or_else(|| ApkupError::NoDirectory {
        kind: "cache".to_string(),
    })?;

    Ok(base.join(APP_DIR))
}

/// Get the cached catalog document path for a repository
pub fn repo_index_file(repo_id: &str) -> Result<PathBuf> {
    Ok(cache_dir()?
        .join(REPOS_DIR)
        .join(make_path_safe(repo_id))
        .join(INDEX_FILE))
}

/// Get the downloaded packages directory
pub fn packages_dir() -> Result<PathBuf> {
    Ok(cache_dir()?.join(PACKAGES_DIR))
}

/// Replace characters that are not valid in file names on every platform
pub fn make_path_safe(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            _ => c,
        })
        .collect()
}
