//! Bundle command implementation

use console::Style;

use crate::cli::bundle::{ApplyArgs, ExportArgs};
use crate::cli::{BundleArgs, BundleSubcommand};
use crate::commands::helpers;
use crate::config::{Bundle, Configuration};
use crate::error::{ApkupError, Result};
use crate::operations::bundle;
use crate::session::Session;

/// Run bundle command
pub fn run(args: BundleArgs) -> Result<()> {
    let mut ctx = helpers::open_config()?;

    match args.command.unwrap_or(BundleSubcommand::List) {
        BundleSubcommand::List => list_bundles(ctx.config()),
        BundleSubcommand::Show(args) => show_bundle(ctx.config(), &args.name),
        BundleSubcommand::New(args) => {
            bundle::create(&mut ctx, &args.name)?;
            println!("Created bundle '{}'", args.name);
            Ok(())
        }
        BundleSubcommand::Remove(args) => {
            bundle::remove(&mut ctx, &args.name)?;
            println!("Removed bundle '{}'", args.name);
            Ok(())
        }
        BundleSubcommand::Apply(args) => apply(ctx.config(), args),
        BundleSubcommand::AddApp(args) => {
            bundle::add_app(&mut ctx, &args.name, &args.member)?;
            println!("Added '{}' to bundle '{}'", args.member, args.name);
            Ok(())
        }
        BundleSubcommand::RemoveApp(args) => {
            bundle::remove_app(&mut ctx, &args.name, &args.member)?;
            println!("Removed '{}' from bundle '{}'", args.member, args.name);
            Ok(())
        }
        BundleSubcommand::AddSource(args) => {
            bundle::add_source(&mut ctx, &args.name, &args.member)?;
            println!("Added repository '{}' to bundle '{}'", args.member, args.name);
            Ok(())
        }
        BundleSubcommand::RemoveSource(args) => {
            bundle::remove_source(&mut ctx, &args.name, &args.member)?;
            println!("Removed repository '{}' from bundle '{}'", args.member, args.name);
            Ok(())
        }
        BundleSubcommand::Import(args) => {
            let id = bundle::import(&mut ctx, &args.path)?;
            println!("Imported bundle '{}'", id);
            Ok(())
        }
        BundleSubcommand::Export(args) => export(ctx.config(), args),
    }
}

fn apply(config: &Configuration, args: ApplyArgs) -> Result<()> {
    let report = bundle::apply(config, &args.name, args.dry_run, Session::open)?;
    helpers::print_report(&report)
}

fn export(config: &Configuration, args: ExportArgs) -> Result<()> {
    let dir = match args.output {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| ApkupError::IoError {
            message: format!("Failed to get current directory: {}", e),
        })?,
    };
    let path = bundle::export(config, &args.name, &dir)?;
    println!("Exported bundle '{}' to {}", args.name, path.display());
    Ok(())
}

fn list_bundles(config: &Configuration) -> Result<()> {
    if config.bundles.is_empty() {
        println!("No bundles.");
        return Ok(());
    }

    println!("Bundles ({}):", config.bundles.len());
    for bundle in &config.bundles {
        println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to(&bundle.id),
            Style::new().dim().apply_to(format!(
                "({} app{})",
                bundle.apps.len(),
                if bundle.apps.len() == 1 { "" } else { "s" }
            ))
        );
    }
    Ok(())
}

fn show_bundle(config: &Configuration, name: &str) -> Result<()> {
    let bundle = config
        .bundle(name)
        .ok_or_else(|| crate::error::bundle::not_found(name))?;
    print_bundle(config, bundle);
    Ok(())
}

fn print_bundle(config: &Configuration, bundle: &Bundle) {
    println!("{}", Style::new().bold().yellow().apply_to(&bundle.id));

    println!("  {}", Style::new().bold().apply_to("Apps:"));
    if bundle.apps.is_empty() {
        println!("    {}", Style::new().dim().apply_to("(none)"));
    }
    for app in &bundle.apps {
        println!("    {}", app);
    }

    println!("  {}", Style::new().bold().apply_to("Repositories:"));
    for source in &bundle.sources {
        if config.repo(source).is_some() {
            println!("    {}", source);
        } else {
            println!("    {} {}", source, Style::new().red().apply_to("(missing)"));
        }
    }
}
