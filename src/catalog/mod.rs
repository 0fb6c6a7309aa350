//! Application catalog
//!
//! The catalog maps application identifiers to their records and the
//! packages that can be downloaded for them. The engine only reads it
//! through the [`Catalog`] trait; [`IndexCatalog`] is the adapter backed by
//! the repository documents cached by `apkup update`.

pub mod index;

use serde::{Deserialize, Serialize};

pub use index::IndexCatalog;

/// Read-only lookup of application records
pub trait Catalog {
    /// Resolve an application identifier to its record
    fn resolve(&self, id: &str) -> Option<&ApplicationRecord>;

    /// Every record, ordered by identifier
    fn applications(&self) -> Vec<&ApplicationRecord>;
}

/// A known application and its downloadable packages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    /// Application identifier (Android package name)
    pub id: String,

    /// Human readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Available packages, highest version code first
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl ApplicationRecord {
    pub fn new(id: impl Into<String>, packages: Vec<Package>) -> Self {
        Self {
            id: id.into(),
            name: None,
            packages,
        }
    }
}

/// A single downloadable build of an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub version_code: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,

    /// Lowest API level the package runs on
    #[serde(default = "default_min_sdk")]
    pub min_sdk: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sdk: Option<u32>,

    /// Native ABIs; empty means architecture independent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abis: Vec<String>,

    /// Signing certificate fingerprint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,

    /// Where to fetch the package bytes from (URL, `file://` URL or path)
    pub locator: String,

    /// Content hash, `blake3:<hex>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

fn default_min_sdk() -> u32 {
    1
}

impl Package {
    /// Create an architecture independent package without signer or hash
    pub fn new(version_code: u64, locator: impl Into<String>) -> Self {
        Self {
            version_code,
            version_name: None,
            min_sdk: default_min_sdk(),
            max_sdk: None,
            abis: Vec::new(),
            signer: None,
            locator: locator.into(),
            hash: None,
        }
    }

    /// File name used when caching the package locally
    pub fn file_name(&self) -> String {
        let tail = self
            .locator
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("package.apk");
        crate::paths::make_path_safe(tail)
    }
}
