//! CraftTUI - Main entry point
//!
//! Pick a server version, select mods with automatic dependency
//! resolution, confirm, download.

use std::path::Path;

use anyhow::Context;
use tracing::{error, info};

use crafttui::app::{self, InstallOptions, SessionOutcome};
use crafttui::catalog;
use crafttui::cli::{Cli, Commands};
use crafttui::fetch::HttpFetcher;
use crafttui::ui::TerminalUi;

/// Initialize the logger with appropriate settings
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG overrides the default level
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("crafttui=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point
fn main() -> anyhow::Result<()> {
    init_tracing();
    info!("CraftTUI starting up");

    let cli = Cli::parse_args();
    match cli.command {
        Some(Commands::Check { catalog }) => run_check(&catalog),
        Some(Commands::Install {
            dir,
            versions_url,
            meta_url,
        }) => {
            let mut opts = InstallOptions {
                dry_run: cli.dry_run,
                ..InstallOptions::default()
            };
            if let Some(dir) = dir {
                opts.target_dir = dir;
            }
            if let Some(url) = versions_url {
                opts.versions_url = url;
            }
            if let Some(url) = meta_url {
                opts.meta_url = url;
            }
            run_installer(&opts)
        }
        None => {
            let opts = InstallOptions {
                dry_run: cli.dry_run,
                ..InstallOptions::default()
            };
            run_installer(&opts)
        }
    }
}

/// Run the interactive TUI installer
fn run_installer(opts: &InstallOptions) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new();
    let ui = TerminalUi::new();
    let mut ui = match ui {
        Ok(ui) => ui,
        Err(e) => {
            error!("could not initialize terminal: {e}");
            return Err(e.into());
        }
    };

    let outcome = app::run(&fetcher, &mut ui, opts);

    // Restore the terminal before printing anything
    drop(ui);

    match outcome {
        Ok(SessionOutcome::Installed(report)) => {
            println!("✓ Installed {} file(s)", report.installed.len());
            if !report.skipped.is_empty() {
                println!("⚠ Skipped: {}", report.skipped.join(", "));
            }
            Ok(())
        }
        Ok(SessionOutcome::Declined) => {
            println!("Exiting. Nothing was installed.");
            Ok(())
        }
        Err(e) => {
            error!("session failed: {e}");
            Err(e.into())
        }
    }
}

/// Validate a local mod-list document
fn run_check(path: &Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let mods = match catalog::parse_mod_document(&text) {
        Ok(mods) => mods,
        Err(e) => {
            eprintln!("✗ {}: {e}", path.display());
            std::process::exit(1);
        }
    };
    let report = catalog::lint_mods(&mods);
    println!("{} mod(s) in {}", report.mods, path.display());
    for name in &report.missing_urls {
        println!("⚠ '{name}' has no download URL");
    }
    for (dep, required_by) in &report.unknown_deps {
        println!("⚠ unsatisfied dependency '{dep}' (required by {required_by})");
    }
    if report.is_clean() {
        println!("✓ Catalog document is valid");
    }
    Ok(())
}
