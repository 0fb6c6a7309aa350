use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Arguments for bundle command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List bundles:\n    apkup bundle\n\n\
                  Create a bundle and add applications:\n    apkup bundle new daily\n    \
                  apkup bundle add-app daily org.fdroid.fdroid\n\n\
                  Install every application of a bundle:\n    apkup bundle apply daily\n\n\
                  Share a bundle:\n    apkup bundle export daily --output ~/bundles\n    \
                  apkup bundle import ~/bundles/daily.yaml")]
pub struct BundleArgs {
    #[command(subcommand)]
    pub command: Option<BundleSubcommand>,
}

/// Bundle subcommands
#[derive(Subcommand, Debug)]
pub enum BundleSubcommand {
    /// List bundles
    List,

    /// Show the applications and repositories of a bundle
    Show(BundleNameArgs),

    /// Create an empty bundle using every known repository
    New(BundleNameArgs),

    /// Delete a bundle
    Remove(BundleNameArgs),

    /// Install or upgrade every application of a bundle
    Apply(ApplyArgs),

    /// Add an application to a bundle
    AddApp(MemberArgs),

    /// Remove an application from a bundle
    #[command(name = "rm-app")]
    RemoveApp(MemberArgs),

    /// Add a repository to a bundle
    AddSource(MemberArgs),

    /// Remove a repository from a bundle
    #[command(name = "rm-source")]
    RemoveSource(MemberArgs),

    /// Import a bundle document
    Import(ImportArgs),

    /// Export a bundle to <name>.yaml
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
pub struct BundleNameArgs {
    /// Bundle name
    pub name: String,
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Bundle name
    pub name: String,

    /// Show what would be installed without fetching or installing anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
pub struct MemberArgs {
    /// Bundle name
    pub name: String,

    /// Application or repository id
    pub member: String,
}

#[derive(Parser, Debug)]
pub struct ImportArgs {
    /// Path of the bundle document
    pub path: PathBuf,
}

#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Bundle name
    pub name: String,

    /// Directory to write the document to (defaults to current directory)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,
}
