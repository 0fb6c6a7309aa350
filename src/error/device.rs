//! Device transport errors

use super::ApkupError;

/// Creates a device command failed error
pub fn command_failed(command: impl Into<String>, reason: impl Into<String>) -> ApkupError {
    ApkupError::DeviceCommandFailed {
        command: command.into(),
        reason: reason.into(),
    }
}

/// Creates an install failed error
pub fn install_failed(path: impl Into<String>, reason: impl Into<String>) -> ApkupError {
    ApkupError::InstallFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
