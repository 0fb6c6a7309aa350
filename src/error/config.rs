//! Configuration errors

use super::ApkupError;

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> ApkupError {
    ApkupError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> ApkupError {
    ApkupError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config write failed error
pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> ApkupError {
    ApkupError::ConfigWriteFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a repository not found error
pub fn repo_not_found(id: impl Into<String>) -> ApkupError {
    ApkupError::RepoNotFound { id: id.into() }
}

/// Creates a repository already exists error
pub fn repo_exists(id: impl Into<String>) -> ApkupError {
    ApkupError::RepoExists { id: id.into() }
}

/// Attach a file path to a parse error raised without one
pub fn at_path(err: ApkupError, path: impl Into<String>) -> ApkupError {
    match err {
        ApkupError::ConfigParseFailed { reason, .. } => parse_failed(path, reason),
        other => other,
    }
}
