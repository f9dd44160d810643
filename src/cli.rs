use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CraftTUI - a terminal installer for game servers and add-on mods
#[derive(Parser)]
#[command(name = "crafttui")]
#[command(about = "A terminal-based installer for game server distributions and add-on mods")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: show what would be downloaded without writing anything.
    ///
    /// The whole interactive flow still runs (version pick, mod selection,
    /// dependency resolution, confirmation); only the install phase is
    /// replaced with a preview.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive installer
    Install {
        /// Directory to install the server and mods into
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Override the version list URL
        #[arg(long)]
        versions_url: Option<String>,

        /// Override the mod-list index URL prefix
        #[arg(long)]
        meta_url: Option<String>,
    },
    /// Validate a local mod-list document without installing anything
    Check {
        /// Path to the mod-list JSON document
        catalog: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
