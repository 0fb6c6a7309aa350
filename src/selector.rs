//! Package selection
//!
//! Picks the package of an application that best matches a device: the
//! highest version code among the compatible ones. Equal version codes keep
//! the first package in catalog order, so the choice is stable between a dry
//! run and the real run.

use crate::catalog::{ApplicationRecord, Package};
use crate::device::CapabilitySet;

/// Select the best compatible package, if any
pub fn select<'a>(app: &'a ApplicationRecord, device: &CapabilitySet) -> Option<&'a Package> {
    let signer = expected_signer(app);
    app.packages
        .iter()
        .filter(|p| is_compatible(p, device) && signed_by(p, signer))
        .fold(None, |best: Option<&Package>, p| match best {
            Some(b) if b.version_code >= p.version_code => Some(b),
            _ => Some(p),
        })
}

/// Whether a package can run on the device
pub fn is_compatible(package: &Package, device: &CapabilitySet) -> bool {
    if package.min_sdk > device.api_level {
        return false;
    }
    if package.max_sdk.is_some_and(|max| max < device.api_level) {
        return false;
    }
    package.abis.is_empty() || package.abis.iter().any(|abi| device.supports_abi(abi))
}

/// Signer of the newest signed package; upgrades must keep the same key
fn expected_signer(app: &ApplicationRecord) -> Option<&str> {
    app.packages
        .iter()
        .filter(|p| p.signer.is_some())
        .fold(None, |best: Option<&Package>, p| match best {
            Some(b) if b.version_code >= p.version_code => Some(b),
            _ => Some(p),
        })
        .and_then(|p| p.signer.as_deref())
}

fn signed_by(package: &Package, signer: Option<&str>) -> bool {
    match (package.signer.as_deref(), signer) {
        (Some(own), Some(expected)) => own == expected,
        _ => true,
    }
}
