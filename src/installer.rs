//! Plan execution: download the server and each planned mod, in plan order
//!
//! Runs only after the user confirmed the plan. A failed mod download is
//! logged and skipped so the rest of the plan still lands; a failed server
//! download aborts, since the mods are useless without it.

use std::path::Path;

use tracing::{info, warn};

use crate::catalog::VersionEntry;
use crate::error::{CraftTuiError, Result};
use crate::fetch::Fetcher;
use crate::resolver::InstallPlan;
use crate::ui::SelectionUi;

/// What the install phase actually did.
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Files downloaded, in order (server first, then mods).
    pub installed: Vec<String>,
    /// Mods that failed to download or had no URL.
    pub skipped: Vec<String>,
}

/// Target filename for a download URL: last path segment, query and
/// fragment stripped, `server.jar` when the URL has no usable segment.
pub fn filename_from_url(url: &str) -> String {
    url.rsplit('/')
        .next()
        .and_then(|segment| segment.split(['?', '#']).next())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "server.jar".to_string())
}

/// Execute the confirmed plan into `target_dir`.
///
/// With `dry_run` set, nothing is written (not even the target directory);
/// each step reports what it would have downloaded.
pub fn execute(
    fetcher: &dyn Fetcher,
    ui: &mut dyn SelectionUi,
    version: &VersionEntry,
    plan: &InstallPlan,
    target_dir: &Path,
    dry_run: bool,
) -> Result<InstallReport> {
    let mut report = InstallReport::default();

    if !dry_run {
        std::fs::create_dir_all(target_dir).map_err(|e| {
            CraftTuiError::install(format!(
                "could not create target directory '{}': {e}",
                target_dir.display()
            ))
        })?;
    }

    // Server distribution first; mods may reference it at runtime.
    let server_file = filename_from_url(&version.url);
    let server_path = target_dir.join(&server_file);
    if dry_run {
        ui.status(&format!(
            "[dry-run] would download '{}' -> {}",
            version.url,
            server_path.display()
        ));
    } else {
        ui.status(&format!("Downloading server: {}", version.label));
        download(fetcher, ui, &version.url, &server_path)
            .map_err(|e| CraftTuiError::install(format!("server download failed: {e}")))?;
        report.installed.push(server_file);
    }

    for m in plan.iter() {
        let Some(url) = m.primary_url() else {
            warn!(name = %m.name, "mod has no download URL");
            ui.status(&format!("Warning: '{}' has no download URL, skipping", m.name));
            report.skipped.push(m.name.clone());
            continue;
        };
        let filename = if m.filename.is_empty() {
            filename_from_url(url)
        } else {
            m.filename.clone()
        };
        let path = target_dir.join(&filename);
        if dry_run {
            ui.status(&format!(
                "[dry-run] would download '{url}' -> {}",
                path.display()
            ));
            continue;
        }
        ui.status(&format!("Downloading mod: {}", m.name));
        match download(fetcher, ui, url, &path) {
            Ok(()) => {
                info!(name = %m.name, file = %filename, "mod installed");
                report.installed.push(filename);
            }
            Err(e) => {
                warn!(name = %m.name, error = %e, "mod download failed");
                ui.status(&format!("Warning: could not download '{}': {e}", m.name));
                report.skipped.push(m.name.clone());
            }
        }
    }

    if !dry_run {
        ui.status(&format!(
            "Install finished: {} file(s) downloaded, {} skipped",
            report.installed.len(),
            report.skipped.len()
        ));
    }
    Ok(report)
}

fn download(
    fetcher: &dyn Fetcher,
    ui: &mut dyn SelectionUi,
    url: &str,
    path: &Path,
) -> Result<()> {
    let display = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    ui.download_begin(&display, url);
    let result = fetcher.fetch_to_file(url, path, &mut |done, total| {
        ui.download_progress(done, total)
    });
    ui.download_finish();
    result
}
