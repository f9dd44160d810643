//! Session orchestration
//!
//! One install session, strictly sequential: fetch the version list, let
//! the user pick a version, build the mod catalog for it, run the
//! selection loop, confirm, install. `Catalog` and `InstallPlan` are owned
//! here and never aliased; every interactive step blocks on the UI.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::catalog::{self, Catalog};
use crate::error::{CraftTuiError, Result};
use crate::fetch::Fetcher;
use crate::installer::{self, InstallReport};
use crate::resolver::{self, InstallPlan};
use crate::ui::SelectionUi;

/// Default version list location.
pub const DEFAULT_VERSIONS_URL: &str =
    "https://raw.githubusercontent.com/crafttui/catalog/main/versions.txt";

/// Default mod-list index prefix; the chosen version's code is appended.
pub const DEFAULT_META_URL: &str = "https://raw.githubusercontent.com/crafttui/catalog/main/meta/";

/// Session configuration, assembled from CLI arguments.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    pub target_dir: PathBuf,
    pub versions_url: String,
    pub meta_url: String,
    pub dry_run: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            target_dir: PathBuf::from("."),
            versions_url: DEFAULT_VERSIONS_URL.to_string(),
            meta_url: DEFAULT_META_URL.to_string(),
            dry_run: false,
        }
    }
}

/// How a session ended, short of an error.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The user confirmed and the install phase ran.
    Installed(InstallReport),
    /// The user declined at confirmation; nothing was written.
    Declined,
}

/// Run one complete install session.
pub fn run(
    fetcher: &dyn Fetcher,
    ui: &mut dyn SelectionUi,
    opts: &InstallOptions,
) -> Result<SessionOutcome> {
    ui.status("Fetching list of server versions...");
    let text = fetcher.fetch_text(&opts.versions_url)?;
    let versions = catalog::parse_version_list(&text)?;

    let labels: Vec<String> = versions.iter().map(|v| v.label.clone()).collect();
    let pick = ui.choose_one("Select Server Version", &labels)?;
    let version = versions
        .get(pick)
        .ok_or_else(|| CraftTuiError::general(format!("version index {pick} out of range")))?
        .clone();
    info!(version = %version.label, code = %version.code, "version selected");

    let mut catalog = load_catalog(fetcher, ui, &opts.meta_url, &version.code)?;
    info!(mods = catalog.len(), "catalog built");

    let mut plan = InstallPlan::new();
    resolver::run_selection_loop(ui, &mut catalog, &mut plan)?;

    if !ui.confirm(&version.label, &plan)? {
        ui.status("Exiting. Nothing was installed.");
        return Ok(SessionOutcome::Declined);
    }

    let report = installer::execute(fetcher, ui, &version, &plan, &opts.target_dir, opts.dry_run)?;
    Ok(SessionOutcome::Installed(report))
}

/// Fetch the group index for a version and every group's mod document.
///
/// One group failing to fetch loses only that group's mods; a document
/// that fetches but does not parse is malformed upstream data and fatal.
fn load_catalog(
    fetcher: &dyn Fetcher,
    ui: &mut dyn SelectionUi,
    meta_url: &str,
    code: &str,
) -> Result<Catalog> {
    ui.status("Fetching mod list index...");
    let index_url = format!("{meta_url}{code}");
    let index_text = fetcher.fetch_text(&index_url)?;

    let mut mods = Vec::new();
    for group in catalog::parse_group_list(&index_text) {
        ui.status(&format!("Fetching list: {}", group.name));
        match fetcher.fetch_text(&group.url) {
            Ok(text) => mods.extend(catalog::parse_mod_document(&text)?),
            Err(e) => {
                warn!(group = %group.name, error = %e, "skipping mod list group");
                ui.status(&format!(
                    "Warning: could not fetch list '{}', skipping",
                    group.name
                ));
            }
        }
    }
    Ok(Catalog::new(mods))
}
