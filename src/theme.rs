//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors and common styles so the menus, the
//! detail pane, and the progress dialog stay visually consistent.

use ratatui::style::{Color, Modifier, Style};

/// Core color palette for the application
/// All colors should be defined here rather than hardcoded in components
pub struct Colors;

impl Colors {
    /// Primary accent color - borders, titles
    pub const PRIMARY: Color = Color::Cyan;

    /// Secondary accent color - selected items, emphasis
    pub const SECONDARY: Color = Color::Yellow;

    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Muted text color - hints, sentinel rows
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Selected item text (for contrast on yellow bg)
    pub const SELECTED_FG: Color = Color::Black;

    /// Progress bar fill
    pub const PROGRESS: Color = Color::Green;

    /// Gauge/progress bar background
    pub const BG_GAUGE: Color = Color::Rgb(40, 40, 50);
}

/// Pre-built styles shared across screens
pub struct Styles;

impl Styles {
    /// Bordered-block title style
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Highlight style for the selected menu row
    pub fn selected() -> Style {
        Style::default()
            .bg(Colors::SELECTED_BG)
            .fg(Colors::SELECTED_FG)
            .add_modifier(Modifier::BOLD)
    }
}
