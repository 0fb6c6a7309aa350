//! Reconciliation of target applications against the device
//!
//! For every target the reconciler decides whether it needs to be installed,
//! upgraded, skipped, or cannot be handled at all. Decisions come out in
//! target order, so identical inputs always produce the same plan.

use std::fmt;

use crate::catalog::{Catalog, Package};
use crate::device::{CapabilitySet, InstalledApps};
use crate::error::{self, ApkupError, Result};
use crate::selector;

/// What to reconcile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Targets {
    /// The given application identifiers, in order
    Explicit(Vec<String>),
    /// Every installed application with a newer compatible package
    AllUpdates,
}

impl Targets {
    /// Build the target set from command line input
    ///
    /// `all_updates` and explicit identifiers are mutually exclusive, and
    /// without `all_updates` at least one identifier is required.
    pub fn new(ids: Vec<String>, all_updates: bool) -> Result<Self> {
        match (all_updates, ids.is_empty()) {
            (true, true) => Ok(Self::AllUpdates),
            (true, false) => Err(error::install::precondition(
                "--updates can only be used without application ids",
            )),
            (false, true) => Err(error::install::precondition("no application ids given")),
            (false, false) => Ok(Self::Explicit(ids)),
        }
    }
}

/// Why an application is left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    UpToDate,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UpToDate => write!(f, "already up to date"),
        }
    }
}

/// Why an application cannot be handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailReason {
    UnknownApplication,
    NoCompatiblePackage,
}

impl FailReason {
    pub fn to_error(self, app: &str) -> ApkupError {
        match self {
            Self::UnknownApplication => error::install::unknown_application(app),
            Self::NoCompatiblePackage => error::install::no_compatible_package(app),
        }
    }
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownApplication => write!(f, "unknown application"),
            Self::NoCompatiblePackage => write!(f, "no compatible package"),
        }
    }
}

/// The verdict for one target application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Install { app: String, package: Package },
    Upgrade { app: String, package: Package, from: u64 },
    Skip { app: String, reason: SkipReason },
    Fail { app: String, reason: FailReason },
}

impl Decision {
    pub fn app(&self) -> &str {
        match self {
            Self::Install { app, .. }
            | Self::Upgrade { app, .. }
            | Self::Skip { app, .. }
            | Self::Fail { app, .. } => app,
        }
    }

    /// Package to fetch and install, for actionable decisions
    pub fn package(&self) -> Option<&Package> {
        match self {
            Self::Install { package, .. } | Self::Upgrade { package, .. } => Some(package),
            Self::Skip { .. } | Self::Fail { .. } => None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.package().is_some()
    }
}

/// Decide what to do for each target, in order
pub fn reconcile(
    targets: &[String],
    installed: &InstalledApps,
    catalog: &dyn Catalog,
    device: &CapabilitySet,
) -> Vec<Decision> {
    targets
        .iter()
        .map(|id| decide(id, installed, catalog, device))
        .collect()
}

fn decide(
    id: &str,
    installed: &InstalledApps,
    catalog: &dyn Catalog,
    device: &CapabilitySet,
) -> Decision {
    let app = id.to_string();
    let Some(record) = catalog.resolve(id) else {
        return fail(app, FailReason::UnknownApplication);
    };
    let Some(package) = selector::select(record, device) else {
        return fail(app, FailReason::NoCompatiblePackage);
    };

    let package = package.clone();
    let decision = match installed.version_code(id) {
        None => Decision::Install { app, package },
        Some(current) if current >= package.version_code => Decision::Skip {
            app,
            reason: SkipReason::UpToDate,
        },
        Some(from) => Decision::Upgrade { app, package, from },
    };
    tracing::debug!(app = id, ?decision, "reconciled");
    decision
}

fn fail(app: String, reason: FailReason) -> Decision {
    tracing::info!(error = %reason.to_error(&app), "cannot reconcile");
    Decision::Fail { app, reason }
}

/// Installed applications that have a newer compatible package, in id order
pub fn update_targets(
    installed: &InstalledApps,
    catalog: &dyn Catalog,
    device: &CapabilitySet,
) -> Vec<String> {
    installed
        .iter()
        .filter(|(id, current)| {
            catalog
                .resolve(id)
                .and_then(|record| selector::select(record, device))
                .is_some_and(|package| package.version_code > *current)
        })
        .map(|(id, _)| id.to_string())
        .collect()
}

/// Resolve a target set into decisions
pub fn reconcile_targets(
    targets: &Targets,
    installed: &InstalledApps,
    catalog: &dyn Catalog,
    device: &CapabilitySet,
) -> Vec<Decision> {
    match targets {
        Targets::Explicit(ids) => reconcile(ids, installed, catalog, device),
        Targets::AllUpdates => {
            let ids = update_targets(installed, catalog, device);
            reconcile(&ids, installed, catalog, device)
        }
    }
}
