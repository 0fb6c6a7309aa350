//! Device handle
//!
//! The engine talks to the connected device only through the [`Device`]
//! trait. [`AdbDevice`] implements it on top of the `adb` executable.

pub mod adb;

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;

pub use adb::AdbDevice;

/// Operations the engine needs from a connected device
pub trait Device {
    /// Snapshot of installed applications and their version codes
    fn installed_applications(&self) -> Result<InstalledApps>;

    /// Attributes used to pick compatible packages
    fn capabilities(&self) -> Result<CapabilitySet>;

    /// Install (or upgrade) a package file
    fn install(&self, path: &Path) -> Result<()>;

    /// Run a shell command on the device and return its standard output
    fn run_shell_command(&self, command: &str) -> Result<Vec<u8>>;
}

/// Device attributes relevant to package compatibility
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    /// Supported ABIs, most preferred first
    pub abis: Vec<String>,

    /// Android API level
    pub api_level: u32,
}

impl CapabilitySet {
    pub fn new(abis: &[&str], api_level: u32) -> Self {
        Self {
            abis: abis.iter().map(ToString::to_string).collect(),
            api_level,
        }
    }

    pub fn supports_abi(&self, abi: &str) -> bool {
        self.abis.iter().any(|a| a == abi)
    }
}

/// Installed applications keyed by identifier, in identifier order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstalledApps(BTreeMap<String, u64>);

impl InstalledApps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, version_code: u64) {
        self.0.insert(id.into(), version_code);
    }

    /// Installed version code of an application
    pub fn version_code(&self, id: &str) -> Option<u64> {
        self.0.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(id, vc)| (id.as_str(), *vc))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for InstalledApps {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, vc)| (id.into(), vc)).collect())
    }
}
