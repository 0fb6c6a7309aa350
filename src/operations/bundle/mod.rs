//! Bundle operations
//!
//! Create, edit, import, export and apply bundles. Every mutation goes
//! through [`ConfigContext::update`], so the configuration file is rewritten
//! after each change and a failed write leaves memory untouched.
//!
//! Applying a bundle checks its preconditions before anything else happens:
//! every referenced repository must still exist and the app list must not be
//! empty. Only then is a session opened and the apps installed, best effort
//! across the whole bundle.

#[cfg(test)]
mod tests;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::{Bundle, ConfigContext, ConfigStore, Configuration};
use crate::error::{self, ApkupError, Result};
use crate::executor::ExecutionReport;
use crate::reconciler::Targets;
use crate::session::Session;

/// Create an empty bundle using every currently known repository
pub fn create<S: ConfigStore>(ctx: &mut ConfigContext<S>, name: &str) -> Result<()> {
    ctx.update(|config| {
        if config.bundle(name).is_some() {
            return Err(error::bundle::exists(name));
        }
        let sources = config.repo_ids();
        config.bundles.push(Bundle::new(name, sources));
        Ok(())
    })?;
    tracing::info!(bundle = name, "bundle created");
    Ok(())
}

/// Delete a bundle
pub fn remove<S: ConfigStore>(ctx: &mut ConfigContext<S>, name: &str) -> Result<Bundle> {
    ctx.update(|config| {
        let pos = config
            .bundles
            .iter()
            .position(|b| b.id == name)
            .ok_or_else(|| error::bundle::not_found(name))?;
        Ok(config.bundles.remove(pos))
    })
}

/// Add an application to a bundle
pub fn add_app<S: ConfigStore>(ctx: &mut ConfigContext<S>, name: &str, app: &str) -> Result<()> {
    ctx.update(|config| {
        let bundle = config.bundle_mut(name)?;
        insert_member(&mut bundle.apps, name, app)
    })
}

/// Remove an application from a bundle
pub fn remove_app<S: ConfigStore>(ctx: &mut ConfigContext<S>, name: &str, app: &str) -> Result<()> {
    ctx.update(|config| {
        let bundle = config.bundle_mut(name)?;
        remove_member(&mut bundle.apps, name, app)
    })
}

/// Add a repository source to a bundle
///
/// The repository has to be known now; it may still disappear later, which
/// is only caught when the bundle is applied.
pub fn add_source<S: ConfigStore>(
    ctx: &mut ConfigContext<S>,
    name: &str,
    source: &str,
) -> Result<()> {
    ctx.update(|config| {
        if config.repo(source).is_none() {
            return Err(error::config::repo_not_found(source));
        }
        let bundle = config.bundle_mut(name)?;
        insert_member(&mut bundle.sources, name, source)
    })
}

/// Remove a repository source from a bundle
pub fn remove_source<S: ConfigStore>(
    ctx: &mut ConfigContext<S>,
    name: &str,
    source: &str,
) -> Result<()> {
    ctx.update(|config| {
        let bundle = config.bundle_mut(name)?;
        remove_member(&mut bundle.sources, name, source)
    })
}

fn insert_member(list: &mut Vec<String>, bundle: &str, member: &str) -> Result<()> {
    if list.iter().any(|m| m == member) {
        return Err(error::bundle::duplicate_member(bundle, member));
    }
    list.push(member.to_string());
    Ok(())
}

fn remove_member(list: &mut Vec<String>, bundle: &str, member: &str) -> Result<()> {
    let pos = list
        .iter()
        .position(|m| m == member)
        .ok_or_else(|| error::bundle::member_not_found(bundle, member))?;
    list.remove(pos);
    Ok(())
}

/// Check that a bundle can be applied and return its targets
///
/// Fails on the first repository source that no longer exists, then on an
/// empty app list.
pub fn plan_apply(config: &Configuration, name: &str) -> Result<Targets> {
    let bundle = config
        .bundle(name)
        .ok_or_else(|| error::bundle::not_found(name))?;

    if let Some(missing) = bundle.sources.iter().find(|s| config.repo(s).is_none()) {
        return Err(error::bundle::missing_source(name, missing));
    }
    if bundle.apps.is_empty() {
        return Err(error::bundle::empty(name));
    }
    tracing::debug!(bundle = name, sources = ?bundle.sources, "all repositories present");

    Ok(Targets::Explicit(bundle.apps.clone()))
}

/// Apply a bundle
///
/// `open` is only called once the preconditions hold, so a bundle that fails
/// them never touches the device.
pub fn apply<F>(config: &Configuration, name: &str, dry_run: bool, open: F) -> Result<ExecutionReport>
where
    F: FnOnce(&Configuration) -> Result<Session>,
{
    let targets = plan_apply(config, name)?;
    let session = open(config)?;
    session.run(&targets, dry_run)
}

/// Import a bundle document as a new bundle
///
/// A bundle whose id is already taken is rejected rather than merged.
pub fn import<S: ConfigStore>(ctx: &mut ConfigContext<S>, path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        error::config::read_failed(path.display().to_string(), e.to_string())
    })?;
    let bundle = Bundle::from_yaml(&content)
        .map_err(|e| error::config::at_path(e, path.display().to_string()))?;

    let id = bundle.id.clone();
    ctx.update(|config| {
        if config.bundle(&bundle.id).is_some() {
            return Err(error::bundle::exists(&bundle.id));
        }
        config.bundles.push(bundle);
        Ok(())
    })?;
    tracing::info!(bundle = %id, path = %path.display(), "bundle imported");
    Ok(id)
}

/// Write a bundle to a new `<id>.yaml` document in `dir`
///
/// The document is written to a temporary file first and only linked into
/// place if no file of that name exists, so a failed write leaves nothing
/// behind.
pub fn export(config: &Configuration, name: &str, dir: &Path) -> Result<PathBuf> {
    let bundle = config
        .bundle(name)
        .ok_or_else(|| error::bundle::not_found(name))?;
    let yaml = bundle.to_yaml()?;
    let path = dir.join(format!("{}.yaml", crate::paths::make_path_safe(&bundle.id)));
    let io_failed = |e: &std::io::Error| ApkupError::IoError {
        message: format!("Failed to create {}: {}", path.display(), e),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| io_failed(&e))?;
    tmp.write_all(yaml.as_bytes()).map_err(|e| io_failed(&e))?;
    tmp.persist_noclobber(&path).map_err(|e| match e.error.kind() {
        std::io::ErrorKind::AlreadyExists => ApkupError::ExportExists {
            path: path.display().to_string(),
        },
        _ => io_failed(&e.error),
    })?;
    tracing::info!(bundle = name, path = %path.display(), "bundle exported");

    Ok(path)
}
