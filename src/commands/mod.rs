//! Command implementations for apkup CLI

pub mod bundle;
pub mod completions;
pub mod devices;
pub mod helpers;
pub mod install;
pub mod repo;
pub mod update;
pub mod version;
