//! Plan execution
//!
//! Runs the actionable decisions of a plan: fetch the package, then install
//! it on the device. A failure is recorded against its application and the
//! next item proceeds. In dry-run mode nothing is fetched or installed.

use std::fmt;

use crate::device::Device;
use crate::error::ApkupError;
use crate::fetch::Fetcher;
use crate::progress::ProgressDisplay;
use crate::reconciler::Decision;

/// Step of an item that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Fetch,
    Install,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "download"),
            Self::Install => write!(f, "install"),
        }
    }
}

/// What happened to a single decision
#[derive(Debug)]
pub enum Outcome {
    /// Skipped or failed during reconciliation; never fetched or installed
    NotActionable,
    /// Recorded by a dry run
    Planned,
    Installed,
    Failed { step: Step, error: ApkupError },
}

/// A decision and its outcome
#[derive(Debug)]
pub struct ItemReport {
    pub decision: Decision,
    pub outcome: Outcome,
}

/// Overall result of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    /// No decision required any action
    NothingToDo,
    /// Every actionable item was installed (or planned)
    Completed,
    /// At least one actionable item failed
    Failed { failed: usize, total: usize },
}

/// Per-application results of executing a plan
#[derive(Debug, Default)]
pub struct ExecutionReport {
    pub items: Vec<ItemReport>,
    pub dry_run: bool,
}

impl ExecutionReport {
    pub fn actionable(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|i| i.decision.is_actionable())
    }

    /// Dry-run text, one `install <id>:<versionCode>` line per planned action
    pub fn planned_lines(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|i| matches!(i.outcome, Outcome::Planned))
            .filter_map(|i| {
                let package = i.decision.package()?;
                Some(format!("install {}:{}", i.decision.app(), package.version_code))
            })
            .collect()
    }

    pub fn installed_count(&self) -> usize {
        self.count(|i| {
            matches!(i.outcome, Outcome::Installed)
                && matches!(i.decision, Decision::Install { .. })
        })
    }

    pub fn upgraded_count(&self) -> usize {
        self.count(|i| {
            matches!(i.outcome, Outcome::Installed)
                && matches!(i.decision, Decision::Upgrade { .. })
        })
    }

    pub fn skipped_count(&self) -> usize {
        self.count(|i| matches!(i.decision, Decision::Skip { .. }))
    }

    /// Applications that could not be handled, with the reason
    ///
    /// Covers both reconciliation failures and failed fetches or installs.
    pub fn failures(&self) -> Vec<(&str, String)> {
        self.items
            .iter()
            .filter_map(|i| match (&i.decision, &i.outcome) {
                (Decision::Fail { app, reason }, _) => Some((app.as_str(), reason.to_string())),
                (d, Outcome::Failed { step, error }) => {
                    Some((d.app(), format!("{step} failed: {error}")))
                }
                _ => None,
            })
            .collect()
    }

    /// Status of the batch; only actionable items can fail it
    pub fn status(&self) -> BatchStatus {
        let total = self.actionable().count();
        if total == 0 {
            return BatchStatus::NothingToDo;
        }
        let failed = self
            .actionable()
            .filter(|i| matches!(i.outcome, Outcome::Failed { .. }))
            .count();
        if failed == 0 {
            BatchStatus::Completed
        } else {
            BatchStatus::Failed { failed, total }
        }
    }

    fn count(&self, pred: impl Fn(&ItemReport) -> bool) -> usize {
        self.items.iter().filter(|i| pred(*i)).count()
    }
}

/// Executes plans against a device
pub struct Executor<'a> {
    fetcher: &'a dyn Fetcher,
    device: &'a dyn Device,
    show_progress: bool,
}

impl<'a> Executor<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, device: &'a dyn Device) -> Self {
        Self {
            fetcher,
            device,
            show_progress: false,
        }
    }

    /// Draw a progress bar while executing
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Execute every decision in order
    pub fn execute(&self, decisions: Vec<Decision>, dry_run: bool) -> ExecutionReport {
        let actionable = decisions.iter().filter(|d| d.is_actionable()).count();
        let progress = if self.show_progress && !dry_run && actionable > 0 {
            ProgressDisplay::new(actionable as u64)
        } else {
            ProgressDisplay::hidden()
        };

        let items = decisions
            .into_iter()
            .map(|decision| {
                let outcome = self.run(&decision, dry_run, &progress);
                ItemReport { decision, outcome }
            })
            .collect();
        progress.finish();

        ExecutionReport { items, dry_run }
    }

    fn run(&self, decision: &Decision, dry_run: bool, progress: &ProgressDisplay) -> Outcome {
        let Some(package) = decision.package() else {
            return Outcome::NotActionable;
        };
        let app = decision.app();
        if dry_run {
            tracing::debug!(app, version_code = package.version_code, "planned");
            return Outcome::Planned;
        }

        progress.update("Downloading", app);
        let outcome = match self.fetcher.fetch(package) {
            Err(error) => {
                tracing::warn!(app, %error, "download failed");
                Outcome::Failed {
                    step: Step::Fetch,
                    error,
                }
            }
            Ok(path) => {
                progress.update("Installing", app);
                progress.println(format!("Installing {app}"));
                match self.device.install(&path) {
                    Ok(()) => {
                        tracing::info!(app, version_code = package.version_code, "installed");
                        Outcome::Installed
                    }
                    Err(error) => {
                        tracing::warn!(app, %error, "install failed");
                        Outcome::Failed {
                            step: Step::Install,
                            error,
                        }
                    }
                }
            }
        };
        progress.inc();
        outcome
    }
}
