//! Bundle-related errors

use super::ApkupError;

/// Creates a bundle not found error
pub fn not_found(name: impl Into<String>) -> ApkupError {
    ApkupError::BundleNotFound { name: name.into() }
}

/// Creates a bundle already exists error
pub fn exists(name: impl Into<String>) -> ApkupError {
    ApkupError::BundleExists { name: name.into() }
}

/// Creates a missing repository source error
pub fn missing_source(bundle: impl Into<String>, source_id: impl Into<String>) -> ApkupError {
    ApkupError::MissingSource {
        bundle: bundle.into(),
        source_id: source_id.into(),
    }
}

/// Creates the precondition error for a bundle without apps
pub fn empty(name: impl Into<String>) -> ApkupError {
    super::install::precondition(format!("Bundle '{}' has no apps", name.into()))
}

/// Creates a duplicate member error
pub fn duplicate_member(bundle: impl Into<String>, member: impl Into<String>) -> ApkupError {
    ApkupError::DuplicateMember {
        bundle: bundle.into(),
        member: member.into(),
    }
}

/// Creates a member not found error
pub fn member_not_found(bundle: impl Into<String>, member: impl Into<String>) -> ApkupError {
    ApkupError::MemberNotFound {
        bundle: bundle.into(),
        member: member.into(),
    }
}
