//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - install: Install command arguments
//! - bundle: Bundle command and subcommand arguments
//! - repo: Repository command and subcommand arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{ArgAction, Parser, Subcommand};

pub mod bundle;
pub mod completions;
pub mod install;
pub mod repo;

pub use bundle::{BundleArgs, BundleSubcommand};
pub use completions::CompletionsArgs;
pub use install::InstallArgs;
pub use repo::{RepoArgs, RepoSubcommand};

/// apkup - Android application updater
///
/// Install and update applications on a connected Android device from package repositories.
#[derive(Parser, Debug)]
#[command(
    name = "apkup",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install and update Android applications over adb",
    long_about = "apkup installs and updates applications on a connected Android device \
                  from package repositories, picking the package that fits the device, \
                  and deploys named bundles of applications in one go.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  apkup update                           \x1b[90m# Refresh repository indexes\x1b[0m\n   \
                  apkup install org.fdroid.fdroid        \x1b[90m# Install an application\x1b[0m\n   \
                  apkup install -u                       \x1b[90m# Upgrade every outdated application\x1b[0m\n   \
                  apkup install -u --dry-run             \x1b[90m# Show what would be upgraded\x1b[0m\n   \
                  apkup bundle apply daily               \x1b[90m# Install every app of a bundle\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output (repeat for debug output)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install or upgrade applications
    Install(InstallArgs),

    /// Manage and apply bundles
    Bundle(BundleArgs),

    /// Manage package repositories
    Repo(RepoArgs),

    /// Download the index of every enabled repository
    Update,

    /// List connected devices
    Devices,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
