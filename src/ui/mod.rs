//! User interaction contract and terminal implementation
//!
//! The session and resolver only see the [`SelectionUi`] trait: select one
//! of N items, select zero-or-more with a live detail view, confirm, show
//! status and download progress. [`term::TerminalUi`] satisfies it with
//! ratatui; tests satisfy it with scripted implementations.

mod term;

pub use term::TerminalUi;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::resolver::InstallPlan;

/// Outcome of one round of the mod menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// The Done sentinel: stop selecting.
    Done,
    /// Index into the remaining catalog, in its sorted order.
    Item(usize),
}

/// Interaction surface required by the session.
///
/// Every method blocks until the user answers; the core is strictly
/// sequential and owns no threads.
pub trait SelectionUi {
    /// Single-choice menu; returns the picked index.
    fn choose_one(&mut self, title: &str, options: &[String]) -> Result<usize>;

    /// One round of the mod menu over the remaining catalog, with a detail
    /// pane for the highlighted entry and incremental numeric jump.
    fn choose_mod(&mut self, catalog: &Catalog) -> Result<Choice>;

    /// Show the plan with 1-based numbers and ask for an explicit yes.
    /// Anything but `y` declines.
    fn confirm(&mut self, version_label: &str, plan: &InstallPlan) -> Result<bool>;

    /// Append a line to the visible status/output area.
    fn status(&mut self, message: &str);

    /// A download is starting; show its progress surface.
    fn download_begin(&mut self, filename: &str, url: &str);

    /// Cumulative bytes downloaded out of `total` (0 when unknown).
    fn download_progress(&mut self, done: u64, total: u64);

    /// The download ended; tear the progress surface down.
    fn download_finish(&mut self);
}
