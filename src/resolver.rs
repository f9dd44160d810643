//! Dependency resolver and interactive selection loop
//!
//! Translates user picks from the mod menu into a final ordered install
//! plan, pulling in declared dependencies recursively.
//!
//! # Design
//!
//! - **Pure logic**: no I/O here beyond tracing; diagnostics are returned
//!   in a [`Resolution`] so the caller decides how to surface them
//! - **Depth-first, remove-before-recurse**: a mod leaves the catalog
//!   before its own dependencies are walked. This single ordering rule is
//!   what makes dependency cycles terminate (the back-edge finds its
//!   target in neither plan nor catalog and degrades to a warning)
//! - **Plan membership is checked before catalog membership**: a
//!   dependency already in the plan is silently satisfied, never a
//!   duplicate and never a warning
//!
//! # Invariants
//!
//! For every plan this module produces:
//!
//! - no two entries share a name
//! - every dependency of a planned entry that is present in the plan
//!   appears before its dependent
//! - entries are only ever appended; the loop models no undo

use tracing::{debug, warn};

use crate::catalog::{Catalog, Mod};
use crate::error::Result;
use crate::ui::{Choice, SelectionUi};

/// The final, ordered install list. Owned by the session; handed to the
/// installer read-only after the user confirms it.
#[derive(Debug, Clone, Default)]
pub struct InstallPlan {
    mods: Vec<Mod>,
}

impl InstallPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exact-name membership test; this is what "already satisfied" means.
    pub fn contains_name(&self, name: &str) -> bool {
        self.mods.iter().any(|m| m.name == name)
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

    /// Plan entry names in install order.
    pub fn names(&self) -> Vec<&str> {
        self.mods.iter().map(|m| m.name.as_str()).collect()
    }

    fn push(&mut self, m: Mod) {
        self.mods.push(m);
    }
}

/// A dependency key that resolved to neither the plan nor the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingDep {
    pub dependency: String,
    pub required_by: String,
}

/// What one selection did to the plan, beyond the chosen mod itself.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    /// Names appended to the plan as dependencies, in append order.
    pub pulled_in: Vec<String>,
    /// Unsatisfied dependency references, in discovery order. Non-fatal.
    pub missing: Vec<MissingDep>,
}

/// Append `chosen` and its unmet dependencies to the plan.
///
/// The caller must already have removed `chosen` from the catalog (the
/// selection loop does this when translating the menu index). Dependencies
/// are walked in declared order; each one still in the catalog is removed,
/// resolved depth-first, and appended before `chosen`, so every entry lands
/// after all of its own dependencies.
pub fn add_with_dependencies(
    plan: &mut InstallPlan,
    catalog: &mut Catalog,
    chosen: Mod,
) -> Resolution {
    let mut resolution = Resolution::default();
    resolve_into(plan, catalog, chosen, &mut resolution);
    resolution
}

fn resolve_into(plan: &mut InstallPlan, catalog: &mut Catalog, current: Mod, out: &mut Resolution) {
    for dep in &current.depends {
        // Plan membership first: an earlier selection may already have
        // satisfied this key. Do not reorder with the catalog lookup.
        if plan.contains_name(dep) {
            continue;
        }
        match catalog.remove(dep) {
            Some(dep_mod) => {
                debug!(dependency = %dep_mod.name, required_by = %current.name, "pulling in dependency");
                let name = dep_mod.name.clone();
                resolve_into(plan, catalog, dep_mod, out);
                out.pulled_in.push(name);
            }
            None => {
                warn!(dependency = %dep, required_by = %current.name, "unsatisfied dependency");
                out.missing.push(MissingDep {
                    dependency: dep.clone(),
                    required_by: current.name.clone(),
                });
            }
        }
    }
    plan.push(current);
}

/// Drive the selection loop until the user picks the Done sentinel.
///
/// Each concrete pick removes the mod from the catalog, resolves it into
/// the plan, and reports pulled-in and missing dependencies through the
/// UI status line. Terminal state is reached only via the sentinel; there
/// is no undo.
pub fn run_selection_loop(
    ui: &mut dyn SelectionUi,
    catalog: &mut Catalog,
    plan: &mut InstallPlan,
) -> Result<()> {
    loop {
        match ui.choose_mod(catalog)? {
            Choice::Done => return Ok(()),
            Choice::Item(index) => {
                let Some(chosen) = catalog.remove_at(index) else {
                    // Stale index from the UI; nothing was removed, keep looping.
                    warn!(index, "selection index out of range");
                    continue;
                };
                let name = chosen.name.clone();
                let resolution = add_with_dependencies(plan, catalog, chosen);
                ui.status(&format!("Selected: {name}"));
                for dep in &resolution.pulled_in {
                    ui.status(&format!("Added as dependency: {dep}"));
                }
                for miss in &resolution.missing {
                    ui.status(&format!(
                        "Warning: unsatisfied dependency '{}' (required by {})",
                        miss.dependency, miss.required_by
                    ));
                }
            }
        }
    }
}
