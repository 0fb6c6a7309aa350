use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install applications:\n    apkup install org.fdroid.fdroid org.videolan.vlc\n\n\
                   Upgrade every installed application with a newer package:\n    apkup install -u\n\n\
                   Show what would be installed:\n    apkup install org.videolan.vlc --dry-run")]
pub struct InstallArgs {
    /// Application ids to install or upgrade
    #[arg(value_name = "ID")]
    pub ids: Vec<String>,

    /// Upgrade every installed application that has a newer package
    #[arg(long, short = 'u')]
    pub updates: bool,

    /// Show what would be installed without fetching or installing anything
    #[arg(long, short = 'n')]
    pub dry_run: bool,
}
