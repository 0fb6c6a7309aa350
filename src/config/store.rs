//! Configuration persistence
//!
//! Every mutation goes through [`ConfigContext::update`], which applies the
//! change to a staged copy, flushes the copy, and only then swaps it into
//! memory. A failed flush leaves the in-memory configuration untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::Configuration;
use crate::error::{self, Result};

/// Storage backend for the configuration document
pub trait ConfigStore {
    /// Load the stored configuration, or the default one if none is stored
    fn load(&self) -> Result<Configuration>;

    /// Replace the stored configuration
    fn save(&self, config: &Configuration) -> Result<()>;
}

/// Configuration stored as a YAML file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform configuration location
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(crate::paths::config_file()?))
    }
}

impl ConfigStore for FileStore {
    fn load(&self) -> Result<Configuration> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no configuration file, using defaults");
            return Ok(Configuration::default());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| error::config::read_failed(self.path.display().to_string(), e.to_string()))?;

        Configuration::from_yaml(&content)
            .map_err(|e| error::config::at_path(e, self.path.display().to_string()))
    }

    fn save(&self, config: &Configuration) -> Result<()> {
        let shown = self.path.display().to_string();
        let write_failed = |e: &dyn std::fmt::Display| error::config::write_failed(&shown, e.to_string());

        let yaml = config.to_yaml()?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| write_failed(&e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_failed(&e))?;
        tmp.write_all(yaml.as_bytes()).map_err(|e| write_failed(&e))?;
        tmp.persist(&self.path).map_err(|e| write_failed(&e.error))?;

        tracing::debug!(path = %shown, "configuration written");
        Ok(())
    }
}

/// In-memory configuration together with the store it is flushed to
#[derive(Debug)]
pub struct ConfigContext<S: ConfigStore = FileStore> {
    config: Configuration,
    store: S,
}

impl<S: ConfigStore> ConfigContext<S> {
    /// Load the configuration from a store
    pub fn load(store: S) -> Result<Self> {
        let config = store.load()?;
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Apply a mutation and flush it
    ///
    /// The mutation runs against a copy. If it fails, or the flush fails, the
    /// in-memory configuration is left as it was.
    pub fn update<T>(&mut self, mutate: impl FnOnce(&mut Configuration) -> Result<T>) -> Result<T> {
        let mut staged = self.config.clone();
        let value = mutate(&mut staged)?;
        self.store.save(&staged)?;
        self.config = staged;
        Ok(value)
    }
}
