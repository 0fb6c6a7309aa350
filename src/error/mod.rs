//! Error types and handling for apkup
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`install`]: Preconditions, resolution and package selection
//! - [`device`]: Device transport errors
//! - [`fetch`]: Package download errors
//! - [`config`]: Configuration persistence errors
//! - [`bundle`]: Bundle errors

pub mod bundle;
pub mod config;
pub mod device;
pub mod fetch;
pub mod install;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for apkup operations
#[derive(Error, Diagnostic, Debug)]
pub enum ApkupError {
    // Precondition errors
    #[error("Invalid arguments: {message}")]
    #[diagnostic(code(apkup::precondition::invalid))]
    Precondition { message: String },

    // Resolution and selection errors
    #[error("Unknown application: {id}")]
    #[diagnostic(
        code(apkup::catalog::unknown_application),
        help("Run 'apkup update' to refresh the catalog, or check the application id")
    )]
    UnknownApplication { id: String },

    #[error("No compatible package found for {id}")]
    #[diagnostic(code(apkup::catalog::no_compatible_package))]
    NoCompatiblePackage { id: String },

    #[error("Failed to read catalog: {path}: {reason}")]
    #[diagnostic(
        code(apkup::catalog::read_failed),
        help("Run 'apkup update' to download the repository index again")
    )]
    CatalogReadFailed { path: String, reason: String },

    // Fetch errors
    #[error("Failed to download {locator}: {reason}")]
    #[diagnostic(code(apkup::fetch::download_failed))]
    FetchFailed { locator: String, reason: String },

    #[error("Hash mismatch for {path}")]
    #[diagnostic(
        code(apkup::fetch::hash_mismatch),
        help("The downloaded file does not match the catalog. Run 'apkup update' and retry")
    )]
    HashMismatch { path: String },

    // Device errors
    #[error("No devices found")]
    #[diagnostic(
        code(apkup::device::none_found),
        help("Connect a device with USB debugging enabled and check 'adb devices'")
    )]
    NoDevices,

    #[error("At most one connected device can be used, found {count}")]
    #[diagnostic(code(apkup::device::too_many))]
    TooManyDevices { count: usize },

    #[error("Device command failed: {command}: {reason}")]
    #[diagnostic(code(apkup::device::command_failed))]
    DeviceCommandFailed { command: String, reason: String },

    #[error("Could not install {path}: {reason}")]
    #[diagnostic(code(apkup::device::install_failed))]
    InstallFailed { path: String, reason: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(apkup::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(apkup::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to write configuration file: {path}: {reason}")]
    #[diagnostic(
        code(apkup::config::write_failed),
        help("The configuration was left unchanged")
    )]
    ConfigWriteFailed { path: String, reason: String },

    #[error("Could not determine {kind} directory")]
    #[diagnostic(code(apkup::config::no_directory))]
    NoDirectory { kind: String },

    #[error("A repository with the id '{id}' already exists")]
    #[diagnostic(code(apkup::config::repo_exists))]
    RepoExists { id: String },

    #[error("A repository with the id '{id}' could not be found")]
    #[diagnostic(
        code(apkup::config::repo_not_found),
        help("Run 'apkup repo' to list known repositories")
    )]
    RepoNotFound { id: String },

    // Bundle errors
    #[error("A bundle with the name '{name}' could not be found")]
    #[diagnostic(
        code(apkup::bundle::not_found),
        help("Run 'apkup bundle' to list bundles")
    )]
    BundleNotFound { name: String },

    #[error("A bundle with the name '{name}' already exists")]
    #[diagnostic(code(apkup::bundle::exists))]
    BundleExists { name: String },

    #[error("Bundle '{bundle}' contains unknown repository id '{source_id}'")]
    #[diagnostic(
        code(apkup::bundle::missing_source),
        help("Add the repository with 'apkup repo add' or drop it with 'apkup bundle rm-source'")
    )]
    MissingSource { bundle: String, source_id: String },

    #[error("'{member}' is already part of bundle '{bundle}'")]
    #[diagnostic(code(apkup::bundle::duplicate_member))]
    DuplicateMember { bundle: String, member: String },

    #[error("'{member}' could not be found in bundle '{bundle}'")]
    #[diagnostic(code(apkup::bundle::member_not_found))]
    MemberNotFound { bundle: String, member: String },

    #[error("Refusing to overwrite existing file: {path}")]
    #[diagnostic(code(apkup::bundle::export_exists))]
    ExportExists { path: String },

    // Batch outcome
    #[error("{failed} of {total} apps failed")]
    #[diagnostic(code(apkup::install::batch_failed))]
    BatchFailed { failed: usize, total: usize },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(apkup::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for ApkupError {
    fn from(err: std::io::Error) -> Self {
        ApkupError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ApkupError {
    fn from(err: serde_yaml::Error) -> Self {
        ApkupError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApkupError {
    fn from(err: serde_json::Error) -> Self {
        ApkupError::CatalogReadFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApkupError {
    fn from(err: reqwest::Error) -> Self {
        ApkupError::FetchFailed {
            locator: err
                .url()
                .map_or_else(|| "unknown".to_string(), ToString::to_string),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ApkupError>;
