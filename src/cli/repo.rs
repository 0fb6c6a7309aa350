use clap::{Parser, Subcommand};

/// Arguments for repo command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List repositories:\n    apkup repo\n\n\
                  Add a repository:\n    apkup repo add izzy https://apt.izzysoft.de/fdroid/repo\n\n\
                  Stop using a repository without removing it:\n    apkup repo disable izzy")]
pub struct RepoArgs {
    #[command(subcommand)]
    pub command: Option<RepoSubcommand>,
}

/// Repository subcommands
#[derive(Subcommand, Debug)]
pub enum RepoSubcommand {
    /// List repositories
    List,

    /// Add a repository
    Add(AddRepoArgs),

    /// Remove a repository
    Remove(RepoIdArgs),

    /// Use a repository when building the catalog
    Enable(RepoIdArgs),

    /// Skip a repository when building the catalog
    Disable(RepoIdArgs),
}

#[derive(Parser, Debug)]
pub struct AddRepoArgs {
    /// Repository id
    pub id: String,

    /// Repository base URL
    pub url: String,
}

#[derive(Parser, Debug)]
pub struct RepoIdArgs {
    /// Repository id
    pub id: String,
}
