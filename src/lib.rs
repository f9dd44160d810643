//! CraftTUI Library
//!
//! Core functionality for the terminal server-and-mods installer: catalog
//! parsing, dependency resolution, the interaction contract, and the
//! install session.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod fetch;
pub mod installer;
pub mod resolver;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use app::{InstallOptions, SessionOutcome, DEFAULT_META_URL, DEFAULT_VERSIONS_URL};
pub use catalog::{
    lint_mods, parse_group_list, parse_mod_document, parse_version_list, Catalog, CatalogReport,
    GroupEntry, Mod, VersionEntry,
};
pub use error::{CraftTuiError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use installer::{filename_from_url, InstallReport};
pub use resolver::{
    add_with_dependencies, run_selection_loop, InstallPlan, MissingDep, Resolution,
};
pub use ui::{Choice, SelectionUi, TerminalUi};
