//! Command helper utilities

use console::Style;

use crate::config::{ConfigContext, FileStore};
use crate::error::{ApkupError, Result};
use crate::executor::{BatchStatus, ExecutionReport};

/// Load the configuration from its platform location
pub fn open_config() -> Result<ConfigContext> {
    ConfigContext::load(FileStore::default_location()?)
}

/// Print the outcome of a batch
///
/// Dry runs print one `install <id>:<versionCode>` line per planned action.
/// Every failure is listed after the batch ran, but only failed installs or
/// downloads make the command fail.
pub fn print_report(report: &ExecutionReport) -> Result<()> {
    let failures = report.failures();
    let status = report.status();

    if report.dry_run {
        for line in report.planned_lines() {
            println!("{line}");
        }
    } else if status != BatchStatus::NothingToDo {
        println!("{}", summary_line(report, failures.len()));
    }

    if status == BatchStatus::NothingToDo {
        eprintln!("All apps up to date.");
    }

    if !failures.is_empty() {
        let red = Style::new().red();
        eprintln!("{}", Style::new().bold().red().apply_to("Failed:"));
        for (app, reason) in &failures {
            eprintln!("  {}: {}", red.apply_to(app), reason);
        }
    }

    match status {
        BatchStatus::Failed { failed, total } => Err(ApkupError::BatchFailed { failed, total }),
        BatchStatus::NothingToDo | BatchStatus::Completed => Ok(()),
    }
}

fn summary_line(report: &ExecutionReport, failed: usize) -> String {
    format!(
        "{} {} installed, {} upgraded, {} skipped, {} failed",
        Style::new().bold().green().apply_to("Done:"),
        report.installed_count(),
        report.upgraded_count(),
        report.skipped_count(),
        failed
    )
}
