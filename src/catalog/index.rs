//! Catalog backed by cached repository documents
//!
//! Each enabled repository has its document cached at
//! `<cache>/repos/<id>/index.json` by `apkup update`. Repositories are merged
//! in configuration order and the first one defining an application wins.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{ApplicationRecord, Catalog};
use crate::config::RepositorySource;
use crate::error::{ApkupError, Result};
use crate::paths;

/// Repository document as cached on disk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexDocument {
    #[serde(default)]
    pub apps: Vec<ApplicationRecord>,
}

impl IndexDocument {
    /// Read a cached repository document
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ApkupError::CatalogReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ApkupError::CatalogReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// In-memory catalog merged from one or more repositories
#[derive(Debug, Clone, Default)]
pub struct IndexCatalog {
    apps: HashMap<String, ApplicationRecord>,
}

impl IndexCatalog {
    /// Build a catalog from records; earlier records win on duplicate ids
    pub fn from_records(records: impl IntoIterator<Item = ApplicationRecord>) -> Self {
        let mut catalog = Self::default();
        catalog.merge(records);
        catalog
    }

    /// Load the cached documents of every enabled repository
    pub fn load<'a>(repos: impl IntoIterator<Item = &'a RepositorySource>) -> Result<Self> {
        let mut catalog = Self::default();
        let mut loaded = 0usize;

        for repo in repos {
            let path = paths::repo_index_file(&repo.id)?;
            if !path.is_file() {
                tracing::warn!(repo = %repo.id, "repository index not downloaded, skipping");
                continue;
            }
            let document = IndexDocument::read(&path)?;
            tracing::debug!(repo = %repo.id, apps = document.apps.len(), "loaded repository index");
            catalog.merge(
                document
                    .apps
                    .into_iter()
                    .map(|record| with_absolute_locators(record, &repo.url)),
            );
            loaded += 1;
        }

        if loaded == 0 {
            return Err(ApkupError::CatalogReadFailed {
                path: paths::cache_dir()?.join(paths::REPOS_DIR).display().to_string(),
                reason: "no repository index has been downloaded".to_string(),
            });
        }

        Ok(catalog)
    }

    fn merge(&mut self, records: impl IntoIterator<Item = ApplicationRecord>) {
        for record in records {
            self.apps.entry(record.id.clone()).or_insert(record);
        }
    }
}

impl Catalog for IndexCatalog {
    fn resolve(&self, id: &str) -> Option<&ApplicationRecord> {
        self.apps.get(id)
    }

    fn applications(&self) -> Vec<&ApplicationRecord> {
        let mut records: Vec<_> = self.apps.values().collect();
        records.sort_by(|a, b| a.id.cmp(&b.id));
        records
    }
}

/// Resolve repository-relative locators against the repository URL
fn with_absolute_locators(mut record: ApplicationRecord, repo_url: &str) -> ApplicationRecord {
    for package in &mut record.packages {
        let is_absolute = package.locator.contains("://") || Path::new(&package.locator).is_absolute();
        if !is_absolute {
            package.locator = format!(
                "{}/{}",
                repo_url.trim_end_matches('/'),
                package.locator.trim_start_matches('/')
            );
        }
    }
    record
}
