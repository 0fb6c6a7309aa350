//! Update command implementation
//!
//! Downloads `<url>/index.json` of every enabled repository into the
//! catalog cache. A failing repository does not stop the others; the first
//! failure is returned once every repository was tried.

use crate::catalog::{Catalog, IndexCatalog, index::IndexDocument};
use crate::commands::helpers;
use crate::error::Result;
use crate::fetch::CachingFetcher;
use crate::paths;

/// Run update command
pub fn run() -> Result<()> {
    let ctx = helpers::open_config()?;
    let config = ctx.config();
    if config.enabled_repos().next().is_none() {
        println!("No enabled repositories.");
        return Ok(());
    }
    let fetcher = CachingFetcher::default_location()?;

    let mut first_error = None;
    for repo in config.enabled_repos() {
        let url = format!("{}/{}", repo.url.trim_end_matches('/'), paths::INDEX_FILE);
        let dest = paths::repo_index_file(&repo.id)?;

        let result = fetcher
            .mirror(&url, &dest)
            .and_then(|()| IndexDocument::read(&dest));
        match result {
            Ok(document) => println!("Updated {} ({} apps)", repo.id, document.apps.len()),
            Err(e) => {
                eprintln!("Failed to update {}: {}", repo.id, e);
                first_error.get_or_insert(e);
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    let catalog = IndexCatalog::load(config.enabled_repos())?;
    println!("{} applications available", catalog.applications().len());
    Ok(())
}
