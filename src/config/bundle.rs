//! Bundle definition
//!
//! A bundle is a named list of applications plus the repositories they are
//! expected to come from. Bundles live in `config.yaml` and can also be
//! exported to and imported from standalone documents of the same shape.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A named set of applications to deploy together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,

    #[serde(default)]
    pub apps: Vec<String>,

    #[serde(default)]
    pub sources: Vec<String>,
}

impl Bundle {
    pub fn new(id: impl Into<String>, sources: Vec<String>) -> Self {
        Self {
            id: id.into(),
            apps: Vec::new(),
            sources,
        }
    }

    /// Parse a standalone bundle document
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let bundle: Self = serde_yaml::from_str(yaml)?;
        Ok(bundle)
    }

    /// Serialize as a standalone bundle document
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
