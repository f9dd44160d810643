//! Terminal implementation of the interaction contract
//!
//! Blocking ratatui screens: numbered single-choice menu, mod menu with a
//! live detail pane and incremental numeric jump, y/N confirmation over a
//! scrolling transcript, and a centered download progress dialog.

use std::io::{stdout, Stdout};
use std::time::Instant;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use crate::catalog::{Catalog, Mod};
use crate::error::{CraftTuiError, Result};
use crate::resolver::InstallPlan;
use crate::theme::{Colors, Styles};
use crate::ui::{Choice, SelectionUi};

/// Page size for PageUp/PageDown in menus.
const MENU_PAGE: usize = 10;

struct DownloadState {
    filename: String,
    url: String,
    started: Instant,
    done: u64,
    total: u64,
}

/// ratatui-backed [`SelectionUi`].
///
/// Owns the terminal for its lifetime: raw mode and the alternate screen
/// are entered in [`TerminalUi::new`] and restored on drop, so callers can
/// print normally after the session ends even when it failed.
pub struct TerminalUi {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Scrolling transcript of status lines (the visible output area).
    lines: Vec<String>,
    /// Bottom status bar content.
    status: String,
    download: Option<DownloadState>,
}

impl TerminalUi {
    pub fn new() -> Result<Self> {
        enable_raw_mode()
            .map_err(|e| CraftTuiError::terminal(format!("failed to enable raw mode: {e}")))?;
        crossterm::execute!(stdout(), EnterAlternateScreen).map_err(|e| {
            let _ = disable_raw_mode();
            CraftTuiError::terminal(format!("failed to enter alternate screen: {e}"))
        })?;
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)
            .map_err(|e| CraftTuiError::terminal(format!("failed to create terminal: {e}")))?;
        Ok(Self {
            terminal,
            lines: Vec::new(),
            status: String::new(),
            download: None,
        })
    }

    /// Next key press. Ctrl+C aborts the session with a terminal error.
    fn next_key(&mut self) -> Result<KeyEvent> {
        loop {
            let ev = event::read()
                .map_err(|e| CraftTuiError::terminal(format!("failed to read input: {e}")))?;
            if let Event::Key(key) = ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Err(CraftTuiError::terminal("interrupted"));
                }
                return Ok(key);
            }
        }
    }

    fn draw_transcript(&mut self) -> Result<()> {
        let lines = &self.lines;
        let status = &self.status;
        let download = &self.download;
        self.terminal
            .draw(|f| {
                let chunks = split_with_status_bar(f.area());
                render_transcript(f, chunks[0], lines);
                render_status_bar(f, chunks[1], status);
                if let Some(d) = download {
                    render_download_dialog(f, d);
                }
            })
            .map_err(|e| CraftTuiError::terminal(format!("failed to draw: {e}")))?;
        Ok(())
    }

    fn draw_choose_one(&mut self, title: &str, options: &[String], selection: usize) -> Result<()> {
        let status = &self.status;
        self.terminal
            .draw(|f| {
                let chunks = split_with_status_bar(f.area());
                let items: Vec<ListItem> = options
                    .iter()
                    .enumerate()
                    .map(|(index, label)| ListItem::new(format!("{}: {}", index + 1, label)))
                    .collect();
                let list = List::new(items)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(format!(" {title} "))
                            .title_style(Styles::title())
                            .border_style(Style::default().fg(Colors::PRIMARY)),
                    )
                    .highlight_style(Styles::selected())
                    .highlight_symbol(">> ");
                let mut list_state = ListState::default();
                list_state.select(Some(selection));
                f.render_stateful_widget(list, chunks[0], &mut list_state);
                render_status_bar(f, chunks[1], status);
            })
            .map_err(|e| CraftTuiError::terminal(format!("failed to draw: {e}")))?;
        Ok(())
    }

    fn draw_choose_mod(&mut self, catalog: &Catalog, selection: usize) -> Result<()> {
        let status = &self.status;
        self.terminal
            .draw(|f| {
                let chunks = split_with_status_bar(f.area());
                let panes = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                    .split(chunks[0]);

                let mut items = vec![ListItem::new("Done").style(Style::default().fg(Colors::FG_MUTED))];
                items.extend(catalog.iter().enumerate().map(|(index, m)| {
                    ListItem::new(format!("{}: {}", index + 1, m.name))
                        .style(Style::default().fg(Colors::FG_PRIMARY))
                }));
                let list = List::new(items)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Select Mods ")
                            .title_style(Styles::title())
                            .border_style(Style::default().fg(Colors::PRIMARY)),
                    )
                    .highlight_style(Styles::selected())
                    .highlight_symbol(">> ");
                let mut list_state = ListState::default();
                list_state.select(Some(selection));
                f.render_stateful_widget(list, panes[0], &mut list_state);

                // Detail pane follows the highlight; row 0 is the sentinel.
                let detail = match selection.checked_sub(1).and_then(|i| catalog.get(i)) {
                    Some(m) => mod_details(m),
                    None => String::from(
                        "Select a mod to see its details.\n\n\
                         Enter on Done finishes selection.\n\
                         Type a number to jump to that entry.",
                    ),
                };
                let detail_widget = Paragraph::new(detail)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Mod Information ")
                            .title_style(Styles::title())
                            .border_style(Style::default().fg(Colors::PRIMARY)),
                    )
                    .wrap(Wrap { trim: false });
                f.render_widget(detail_widget, panes[1]);

                render_status_bar(f, chunks[1], status);
            })
            .map_err(|e| CraftTuiError::terminal(format!("failed to draw: {e}")))?;
        Ok(())
    }
}

impl Drop for TerminalUi {
    fn drop(&mut self) {
        // Always attempt cleanup, even if the session failed
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(stdout(), LeaveAlternateScreen);
    }
}

impl SelectionUi for TerminalUi {
    fn choose_one(&mut self, title: &str, options: &[String]) -> Result<usize> {
        if options.is_empty() {
            return Err(CraftTuiError::terminal("menu has no options"));
        }
        let mut selection = 0usize;
        let mut typed = 0usize;
        loop {
            self.draw_choose_one(title, options, selection)?;
            let key = self.next_key()?;
            match key.code {
                KeyCode::Enter => {
                    self.status.clear();
                    return Ok(selection);
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    typed = typed * 10 + (c as u8 - b'0') as usize;
                    // Menu labels are 1-based
                    selection = typed.saturating_sub(1).min(options.len() - 1);
                    self.status = typed.to_string();
                }
                other => {
                    if typed != 0 {
                        typed = 0;
                        self.status.clear();
                    }
                    apply_nav_key(other, &mut selection, options.len());
                }
            }
        }
    }

    fn choose_mod(&mut self, catalog: &Catalog) -> Result<Choice> {
        // Row 0 is the Done sentinel; catalog entries follow, 1-based.
        let rows = catalog.len() + 1;
        let mut selection = 0usize;
        let mut typed = 0usize;
        loop {
            self.draw_choose_mod(catalog, selection)?;
            let key = self.next_key()?;
            match key.code {
                KeyCode::Enter => {
                    self.status.clear();
                    return Ok(match selection.checked_sub(1) {
                        Some(index) => Choice::Item(index),
                        None => Choice::Done,
                    });
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    typed = typed * 10 + (c as u8 - b'0') as usize;
                    selection = typed.min(rows - 1);
                    self.status = typed.to_string();
                }
                other => {
                    if typed != 0 {
                        typed = 0;
                        self.status.clear();
                    }
                    apply_nav_key(other, &mut selection, rows);
                }
            }
        }
    }

    fn confirm(&mut self, version_label: &str, plan: &InstallPlan) -> Result<bool> {
        self.lines.push(String::new());
        self.lines.push(format!(
            "About to download server '{version_label}', and add the following mods in this order:"
        ));
        for (index, m) in plan.iter().enumerate() {
            self.lines.push(format!("{}: {}", index + 1, m.name));
        }
        self.lines.push("Are you sure? (y/N): ".to_string());
        self.status = "Are you sure? (y/N)".to_string();
        self.draw_transcript()?;

        let key = self.next_key()?;
        self.status.clear();
        Ok(matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')))
    }

    fn status(&mut self, message: &str) {
        tracing::info!("{message}");
        self.lines.push(message.to_string());
        self.status = message.to_string();
        // Status is fire-and-forget; a failed frame is not worth aborting for.
        let _ = self.draw_transcript();
    }

    fn download_begin(&mut self, filename: &str, url: &str) {
        self.download = Some(DownloadState {
            filename: filename.to_string(),
            url: url.to_string(),
            started: Instant::now(),
            done: 0,
            total: 0,
        });
        let _ = self.draw_transcript();
    }

    fn download_progress(&mut self, done: u64, total: u64) {
        if let Some(d) = self.download.as_mut() {
            d.done = done;
            d.total = total;
        }
        let _ = self.draw_transcript();
    }

    fn download_finish(&mut self) {
        self.download = None;
        let _ = self.draw_transcript();
    }
}

// ============================================================================
// Rendering helpers
// ============================================================================

fn split_with_status_bar(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Main content area
            Constraint::Length(1), // Status bar
        ])
        .split(area)
}

fn render_transcript(f: &mut Frame, area: Rect, lines: &[String]) {
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;
    let transcript = Paragraph::new(lines.join("\n"))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" CraftTUI ")
                .title_style(Styles::title())
                .border_style(Style::default().fg(Colors::PRIMARY)),
        )
        .scroll((scroll, 0))
        .wrap(Wrap { trim: false });
    f.render_widget(transcript, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, status: &str) {
    let bar = Paragraph::new(status.to_string())
        .style(Style::default().fg(Colors::SECONDARY));
    f.render_widget(bar, area);
}

fn render_download_dialog(f: &mut Frame, d: &DownloadState) {
    let area = f.area();
    let width = 56u16.min(area.width);
    let height = 8u16.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let dialog = Rect::new(x, y, width, height);

    f.render_widget(Clear, dialog);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Downloading ")
        .title_style(Styles::title())
        .border_style(Style::default().fg(Colors::PRIMARY));
    let inner = block.inner(dialog);
    f.render_widget(block, dialog);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Filename
            Constraint::Length(1), // Source URL
            Constraint::Length(1), // Speed
            Constraint::Length(1), // spacer
            Constraint::Length(1), // Gauge
        ])
        .split(inner);

    let elapsed = d.started.elapsed().as_secs_f64().max(0.001);
    let speed_kb = d.done as f64 / elapsed / 1024.0;
    f.render_widget(Paragraph::new(format!("File: {}", d.filename)), rows[0]);
    f.render_widget(Paragraph::new(format!("From: {}", d.url)), rows[1]);
    f.render_widget(
        Paragraph::new(format!("Speed: {speed_kb:.2} kB/s")),
        rows[2],
    );

    let (ratio, label) = if d.total > 0 {
        (
            (d.done as f64 / d.total as f64).clamp(0.0, 1.0),
            format!(
                "{}/{} kB ({:.1}%)",
                d.done / 1024,
                d.total / 1024,
                d.done as f64 / d.total as f64 * 100.0
            ),
        )
    } else {
        (0.0, format!("{} kB", d.done / 1024))
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Colors::PROGRESS).bg(Colors::BG_GAUGE))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, rows[4]);
}

fn mod_details(m: &Mod) -> String {
    let mut text = format!(
        "Name: {}\n\nMod: {}\n\nAuthor: {}\n\nURL: {}\n\nFilename: {}\n",
        m.name,
        m.mod_name,
        m.author,
        m.primary_url().unwrap_or("-"),
        m.filename,
    );
    if !m.depends.is_empty() {
        text.push_str(&format!("\nRequires: {}\n", m.depends.join(", ")));
    }
    text.push_str(&format!("\nDescription:\n{}\n", m.desc));
    text
}

/// Shared navigation handling for both menus. `len` is the row count.
fn apply_nav_key(code: KeyCode, selection: &mut usize, len: usize) {
    match code {
        KeyCode::Up => *selection = selection.saturating_sub(1),
        KeyCode::Down => {
            if *selection + 1 < len {
                *selection += 1;
            }
        }
        KeyCode::PageUp => *selection = selection.saturating_sub(MENU_PAGE),
        KeyCode::PageDown => *selection = (*selection + MENU_PAGE).min(len - 1),
        KeyCode::Home => *selection = 0,
        KeyCode::End => *selection = len - 1,
        _ => {}
    }
}
