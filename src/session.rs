//! Install session
//!
//! A session binds the catalog, the device and the fetcher used by a single
//! invocation, and runs targets through the reconciler and the executor.
//! The installed-state snapshot is taken once per run.

use crate::catalog::{Catalog, IndexCatalog};
use crate::config::Configuration;
use crate::device::{AdbDevice, Device};
use crate::error::Result;
use crate::executor::{ExecutionReport, Executor};
use crate::fetch::{CachingFetcher, Fetcher};
use crate::reconciler::{self, Decision, Targets};

pub struct Session {
    catalog: Box<dyn Catalog>,
    device: Box<dyn Device>,
    fetcher: Box<dyn Fetcher>,
    show_progress: bool,
}

impl Session {
    pub fn new(catalog: Box<dyn Catalog>, device: Box<dyn Device>, fetcher: Box<dyn Fetcher>) -> Self {
        Self {
            catalog,
            device,
            fetcher,
            show_progress: false,
        }
    }

    /// Open a session on the connected device and the cached catalog
    pub fn open(config: &Configuration) -> Result<Self> {
        let device = AdbDevice::connect()?;
        let catalog = IndexCatalog::load(config.enabled_repos())?;
        tracing::debug!(apps = catalog.applications().len(), "catalog loaded");
        let fetcher = CachingFetcher::default_location()?;

        let mut session = Self::new(Box::new(catalog), Box::new(device), Box::new(fetcher));
        session.show_progress = true;
        Ok(session)
    }

    /// Decide what to do for the targets
    pub fn plan(&self, targets: &Targets) -> Result<Vec<Decision>> {
        let installed = self.device.installed_applications()?;
        let capabilities = self.device.capabilities()?;
        tracing::debug!(
            installed = installed.len(),
            abis = ?capabilities.abis,
            api_level = capabilities.api_level,
            "device state"
        );
        Ok(reconciler::reconcile_targets(
            targets,
            &installed,
            self.catalog.as_ref(),
            &capabilities,
        ))
    }

    /// Plan the targets and execute the plan
    pub fn run(&self, targets: &Targets, dry_run: bool) -> Result<ExecutionReport> {
        let decisions = self.plan(targets)?;
        let executor = Executor::new(self.fetcher.as_ref(), self.device.as_ref())
            .with_progress(self.show_progress);
        Ok(executor.execute(decisions, dry_run))
    }
}
