//! Precondition, resolution and selection errors

use super::ApkupError;

/// Creates a precondition error
pub fn precondition(message: impl Into<String>) -> ApkupError {
    ApkupError::Precondition {
        message: message.into(),
    }
}

/// Creates an unknown application error
pub fn unknown_application(id: impl Into<String>) -> ApkupError {
    ApkupError::UnknownApplication { id: id.into() }
}

/// Creates a no compatible package error
pub fn no_compatible_package(id: impl Into<String>) -> ApkupError {
    ApkupError::NoCompatiblePackage { id: id.into() }
}
