//! Install command implementation
//!
//! Installs or upgrades explicit application ids, or every installed
//! application with a newer compatible package (`--updates`).
//!
//! The process:
//! 1. Build the target set, rejecting invalid combinations before any work
//! 2. Load the configuration and open a session on the connected device
//! 3. Reconcile the targets and execute the plan
//! 4. Print the summary or the dry-run lines

use crate::cli::InstallArgs;
use crate::commands::helpers;
use crate::error::Result;
use crate::reconciler::Targets;
use crate::session::Session;

/// Run install command
pub fn run(args: InstallArgs) -> Result<()> {
    let targets = Targets::new(args.ids, args.updates)?;
    let ctx = helpers::open_config()?;
    let session = Session::open(ctx.config())?;
    let report = session.run(&targets, args.dry_run)?;
    helpers::print_report(&report)
}
