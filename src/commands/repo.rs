//! Repository command implementation

use console::Style;

use crate::cli::{RepoArgs, RepoSubcommand};
use crate::commands::helpers;
use crate::config::{Configuration, RepositorySource};
use crate::error::Result;
use crate::paths;

/// Run repo command
pub fn run(args: RepoArgs) -> Result<()> {
    let mut ctx = helpers::open_config()?;

    match args.command.unwrap_or(RepoSubcommand::List) {
        RepoSubcommand::List => list_repos(ctx.config()),
        RepoSubcommand::Add(args) => {
            ctx.update(|c| c.add_repo(RepositorySource::new(&args.id, &args.url)))?;
            println!("Added repository '{}'", args.id);
            println!("Run 'apkup update' to download its index.");
            Ok(())
        }
        RepoSubcommand::Remove(args) => {
            ctx.update(|c| c.remove_repo(&args.id))?;
            println!("Removed repository '{}'", args.id);
            Ok(())
        }
        RepoSubcommand::Enable(args) => {
            ctx.update(|c| c.set_repo_enabled(&args.id, true))?;
            println!("Enabled repository '{}'", args.id);
            Ok(())
        }
        RepoSubcommand::Disable(args) => {
            ctx.update(|c| c.set_repo_enabled(&args.id, false))?;
            println!("Disabled repository '{}'", args.id);
            Ok(())
        }
    }
}

fn list_repos(config: &Configuration) -> Result<()> {
    if config.repos.is_empty() {
        println!("No repositories.");
        return Ok(());
    }

    println!("Repositories ({}):", config.repos.len());
    for repo in &config.repos {
        let state = if repo.enabled {
            Style::new().green().apply_to("enabled")
        } else {
            Style::new().dim().apply_to("disabled")
        };
        let cached = paths::repo_index_file(&repo.id)?.is_file();
        println!(
            "  {} {} [{}{}]",
            Style::new().bold().yellow().apply_to(&repo.id),
            repo.url,
            state,
            if cached { "" } else { ", not downloaded" }
        );
    }
    Ok(())
}
