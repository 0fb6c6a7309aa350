//! apkup - Android application updater
//!
//! A command line tool that installs and upgrades applications on a connected
//! Android device from package repositories, and deploys named bundles of
//! applications.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::EnvFilter;

mod catalog;
mod cli;
mod commands;
mod config;
mod device;
mod error;
mod executor;
mod fetch;
mod operations;
mod paths;
mod progress;
mod reconciler;
mod selector;
mod session;
#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

/// Environment variable overriding the log filter
const LOG_ENV: &str = "APKUP_LOG";

fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "apkup=info",
        _ => "apkup=debug",
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(args),
        Commands::Bundle(args) => commands::bundle::run(args),
        Commands::Repo(args) => commands::repo::run(args),
        Commands::Update => commands::update::run(),
        Commands::Devices => commands::devices::run(),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(help) = e.help() {
            eprintln!("  help: {}", help);
        }
        std::process::exit(1);
    }
}
