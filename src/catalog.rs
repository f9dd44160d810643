//! Mod catalog: records, ordered collection, and remote list parsing
//!
//! The catalog is built once per session from fetched data, drained by the
//! selection loop, and discarded after confirmation. Collections here are
//! small (tens to low hundreds of entries), so lookup and removal are
//! deliberately linear scans over a sorted `Vec`.

use serde::{Deserialize, Serialize};

use crate::error::{CraftTuiError, Result};

/// A single add-on module from a mod-list document.
///
/// `name` is the identity key: plan membership, catalog removal, and
/// dependency references all compare it as an exact string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mod {
    /// Display name, unique within a catalog.
    pub name: String,
    /// Parent mod/project this entry belongs to.
    #[serde(rename = "mod", default)]
    pub mod_name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub desc: String,
    /// Download locations; the first entry is primary.
    #[serde(default)]
    pub url: Vec<String>,
    /// Target filename on disk.
    #[serde(default)]
    pub filename: String,
    /// Names of other mods this one requires, in declared order. Keys may
    /// reference mods absent from the catalog; that is a warning, not an
    /// error.
    #[serde(default)]
    pub depends: Vec<String>,
}

impl Mod {
    /// Primary download location, if any was declared.
    pub fn primary_url(&self) -> Option<&str> {
        self.url.first().map(String::as_str)
    }
}

/// One selectable server version from the version list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionEntry {
    /// Download URL for the server distribution itself.
    pub url: String,
    /// Short code used to build the group-index URL for this version.
    pub code: String,
    /// Human-readable label shown in the version menu.
    pub label: String,
}

/// One mod-list group from the group index of a version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub url: String,
    pub name: String,
}

/// Ordered, drainable collection of mods, keyed by name.
///
/// Sorted by name on construction; iteration and removal preserve the
/// order of the remaining entries.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    mods: Vec<Mod>,
}

impl Catalog {
    /// Build a catalog from parsed mods, sorting them into display order.
    pub fn new(mut mods: Vec<Mod>) -> Self {
        mods.sort_by(|a, b| a.name.cmp(&b.name));
        Self { mods }
    }

    /// Remove and return the first mod with exactly this name.
    pub fn remove(&mut self, name: &str) -> Option<Mod> {
        let index = self.mods.iter().position(|m| m.name == name)?;
        Some(self.mods.remove(index))
    }

    /// Remove and return the mod at `index`, or `None` if out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<Mod> {
        if index < self.mods.len() {
            Some(self.mods.remove(index))
        } else {
            None
        }
    }

    pub fn get(&self, index: usize) -> Option<&Mod> {
        self.mods.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mod> {
        self.mods.iter()
    }

    pub fn len(&self) -> usize {
        self.mods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }
}

// ============================================================================
// Remote list parsing
// ============================================================================

/// Parse the line-oriented version list: `URL CODE LABEL...` per line.
///
/// Blank and malformed lines are skipped; an empty result is an error
/// because the installer has nothing to offer without versions.
pub fn parse_version_list(text: &str) -> Result<Vec<VersionEntry>> {
    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(3, ' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(url), Some(code), Some(label))
                if !url.is_empty() && !code.is_empty() && !label.trim().is_empty() =>
            {
                entries.push(VersionEntry {
                    url: url.to_string(),
                    code: code.to_string(),
                    label: label.trim().to_string(),
                });
            }
            _ => {
                tracing::warn!(line, "skipping malformed version list line");
            }
        }
    }
    if entries.is_empty() {
        return Err(CraftTuiError::parse("version list contains no entries"));
    }
    Ok(entries)
}

/// Parse the group index: `URL NAME...` per line. Tolerant; malformed
/// lines are skipped so one bad entry does not lose the whole index.
pub fn parse_group_list(text: &str) -> Vec<GroupEntry> {
    let mut groups = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut parts = line.splitn(2, ' ');
        match (parts.next(), parts.next()) {
            (Some(url), Some(name)) if !url.is_empty() && !name.trim().is_empty() => {
                groups.push(GroupEntry {
                    url: url.to_string(),
                    name: name.trim().to_string(),
                });
            }
            _ => {
                tracing::warn!(line, "skipping malformed group index line");
            }
        }
    }
    groups
}

/// Wire shape of a mod-list document.
#[derive(Debug, Deserialize)]
struct ModDocument {
    mods: Vec<Mod>,
}

/// Parse one mod-list document. A document that fetched but does not
/// parse means malformed upstream data and is fatal for the run.
pub fn parse_mod_document(text: &str) -> Result<Vec<Mod>> {
    let doc: ModDocument = serde_json::from_str(text)?;
    Ok(doc.mods)
}

// ============================================================================
// Offline document validation (`crafttui check`)
// ============================================================================

/// Findings from validating a mod-list document on its own.
#[derive(Debug, Default)]
pub struct CatalogReport {
    /// Total mods in the document.
    pub mods: usize,
    /// Mods that declare no download URL.
    pub missing_urls: Vec<String>,
    /// `(dependency, required_by)` pairs no mod in the document satisfies.
    pub unknown_deps: Vec<(String, String)>,
}

impl CatalogReport {
    pub fn is_clean(&self) -> bool {
        self.missing_urls.is_empty() && self.unknown_deps.is_empty()
    }
}

/// Validate a parsed document without fetching anything: every dependency
/// key should resolve to some mod in the same document, and every mod
/// should have at least one download location.
pub fn lint_mods(mods: &[Mod]) -> CatalogReport {
    let mut report = CatalogReport {
        mods: mods.len(),
        ..CatalogReport::default()
    };
    for m in mods {
        if m.primary_url().is_none() {
            report.missing_urls.push(m.name.clone());
        }
        for dep in &m.depends {
            if !mods.iter().any(|other| &other.name == dep) {
                report.unknown_deps.push((dep.clone(), m.name.clone()));
            }
        }
    }
    report
}
