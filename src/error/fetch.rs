//! Package download errors

use super::ApkupError;

/// Creates a download failed error
pub fn failed(locator: impl Into<String>, reason: impl Into<String>) -> ApkupError {
    ApkupError::FetchFailed {
        locator: locator.into(),
        reason: reason.into(),
    }
}

/// Creates a hash mismatch error
pub fn hash_mismatch(path: impl Into<String>) -> ApkupError {
    ApkupError::HashMismatch { path: path.into() }
}
