//! In-memory collaborators for unit tests.
//!
//! The fakes share their recorded state through `Rc`, so a test can keep a
//! clone for assertions after handing the original to a session.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakeDevice, FakeFetcher};
//!
//! let fetcher = FakeFetcher::new();
//! let device = FakeDevice::new().with_installed("org.example", 3);
//! let report = Executor::new(&fetcher, &device).execute(decisions, false);
//! assert_eq!(fetcher.fetched(), vec!["org.example_4.apk"]);
//! ```

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::catalog::{ApplicationRecord, IndexCatalog, Package};
use crate::config::{ConfigStore, Configuration};
use crate::device::{CapabilitySet, Device, InstalledApps};
use crate::error::{self, Result};
use crate::fetch::Fetcher;

/// Fetcher that records locators and hands out fake paths
#[derive(Debug, Clone, Default)]
pub struct FakeFetcher {
    fetched: Rc<RefCell<Vec<String>>>,
    failing: Option<String>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail when fetching this locator
    pub fn failing_on(mut self, locator: &str) -> Self {
        self.failing = Some(locator.to_string());
        self
    }

    /// Path handed out for a locator
    pub fn path_for(locator: &str) -> PathBuf {
        PathBuf::from("/fake/cache").join(locator)
    }

    /// Locators fetched so far, in order
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, package: &Package) -> Result<PathBuf> {
        self.fetched.borrow_mut().push(package.locator.clone());
        if self.failing.as_deref() == Some(package.locator.as_str()) {
            return Err(error::fetch::failed(&package.locator, "connection refused"));
        }
        Ok(Self::path_for(&package.locator))
    }
}

/// Device with a fixed installed snapshot that records installs
#[derive(Debug, Clone)]
pub struct FakeDevice {
    installed: InstalledApps,
    capabilities: CapabilitySet,
    installs: Rc<RefCell<Vec<PathBuf>>>,
    snapshots: Rc<Cell<usize>>,
    failing: Option<PathBuf>,
}

impl Default for FakeDevice {
    fn default() -> Self {
        Self {
            installed: InstalledApps::new(),
            capabilities: CapabilitySet::new(&["arm64-v8a", "armeabi-v7a"], 30),
            installs: Rc::default(),
            snapshots: Rc::default(),
            failing: None,
        }
    }
}

impl FakeDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installed(mut self, id: &str, version_code: u64) -> Self {
        self.installed.insert(id, version_code);
        self
    }

    /// Fail when installing this path
    pub fn failing_on(mut self, path: PathBuf) -> Self {
        self.failing = Some(path);
        self
    }

    /// Paths installed so far, in order
    pub fn installs(&self) -> Vec<PathBuf> {
        self.installs.borrow().clone()
    }

    /// How often the installed snapshot was taken
    pub fn snapshots(&self) -> usize {
        self.snapshots.get()
    }
}

impl Device for FakeDevice {
    fn installed_applications(&self) -> Result<InstalledApps> {
        self.snapshots.set(self.snapshots.get() + 1);
        Ok(self.installed.clone())
    }

    fn capabilities(&self) -> Result<CapabilitySet> {
        Ok(self.capabilities.clone())
    }

    fn install(&self, path: &Path) -> Result<()> {
        self.installs.borrow_mut().push(path.to_path_buf());
        if self.failing.as_deref() == Some(path) {
            return Err(error::device::install_failed(
                path.display().to_string(),
                "Failure [INSTALL_FAILED_UPDATE_INCOMPATIBLE]",
            ));
        }
        Ok(())
    }

    fn run_shell_command(&self, command: &str) -> Result<Vec<u8>> {
        Ok(format!("{command}\n").into_bytes())
    }
}

/// Configuration store kept in memory
#[derive(Debug, Clone)]
pub struct MemoryStore {
    saved: Rc<RefCell<Option<Configuration>>>,
    initial: Configuration,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new(initial: Configuration) -> Self {
        Self {
            saved: Rc::default(),
            initial,
            fail_writes: Rc::default(),
        }
    }

    /// Make every following save fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Last configuration saved, if any
    pub fn saved(&self) -> Option<Configuration> {
        self.saved.borrow().clone()
    }
}

impl ConfigStore for MemoryStore {
    fn load(&self) -> Result<Configuration> {
        Ok(self.saved().unwrap_or_else(|| self.initial.clone()))
    }

    fn save(&self, config: &Configuration) -> Result<()> {
        if self.fail_writes.get() {
            return Err(error::config::write_failed("memory", "simulated write failure"));
        }
        *self.saved.borrow_mut() = Some(config.clone());
        Ok(())
    }
}

/// Catalog with one architecture independent package per (id, version code)
pub fn catalog_of(apps: &[(&str, u64)]) -> IndexCatalog {
    IndexCatalog::from_records(apps.iter().map(|(id, version_code)| {
        ApplicationRecord::new(
            *id,
            vec![Package::new(*version_code, format!("{id}_{version_code}.apk"))],
        )
    }))
}
