//! Configuration file handling for apkup
//!
//! This module contains data structures for:
//! - `config.yaml` - Known repositories and bundles
//! - `<bundle>.yaml` - A single bundle, used by import and export

pub mod bundle;
pub mod store;


use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

// Re-export commonly used types
pub use bundle::Bundle;
pub use store::{ConfigContext, ConfigStore, FileStore};

/// Identifier of the repository every fresh configuration starts with
pub const DEFAULT_REPO_ID: &str = "f-droid";

/// URL of the default repository
pub const DEFAULT_REPO_URL: &str = "https://f-droid.org/repo";

/// A package repository the catalog is built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySource {
    pub id: String,

    pub url: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl RepositorySource {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            enabled: true,
        }
    }
}

/// Process-wide configuration (config.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub repos: Vec<RepositorySource>,

    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            repos: vec![RepositorySource::new(DEFAULT_REPO_ID, DEFAULT_REPO_URL)],
            bundles: Vec::new(),
        }
    }
}

impl Configuration {
    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize configuration to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Find a repository by id
    pub fn repo(&self, id: &str) -> Option<&RepositorySource> {
        self.repos.iter().find(|r| r.id == id)
    }

    /// Identifiers of every known repository, in configuration order
    pub fn repo_ids(&self) -> Vec<String> {
        self.repos.iter().map(|r| r.id.clone()).collect()
    }

    /// Repositories the catalog is built from
    pub fn enabled_repos(&self) -> impl Iterator<Item = &RepositorySource> {
        self.repos.iter().filter(|r| r.enabled)
    }

    /// Find a bundle by id
    pub fn bundle(&self, name: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.id == name)
    }

    /// Find a bundle by id, failing if it does not exist
    pub fn bundle_mut(&mut self, name: &str) -> Result<&mut Bundle> {
        self.bundles
            .iter_mut()
            .find(|b| b.id == name)
            .ok_or_else(|| error::bundle::not_found(name))
    }

    /// Add a repository
    pub fn add_repo(&mut self, repo: RepositorySource) -> Result<()> {
        if self.repo(&repo.id).is_some() {
            return Err(error::config::repo_exists(repo.id));
        }
        self.repos.push(repo);
        Ok(())
    }

    /// Remove a repository
    ///
    /// Bundles referencing it are left untouched; they fail when applied.
    pub fn remove_repo(&mut self, id: &str) -> Result<RepositorySource> {
        let pos = self
            .repos
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| error::config::repo_not_found(id))?;
        Ok(self.repos.remove(pos))
    }

    /// Enable or disable a repository
    pub fn set_repo_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        let repo = self
            .repos
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| error::config::repo_not_found(id))?;
        repo.enabled = enabled;
        Ok(())
    }
}
