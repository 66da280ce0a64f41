// UI module for rendering the TUI.
// Contains the tab bar, the portfolio pages, and the repository list.

mod list;
mod profile;
mod tabs;
mod theme;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

pub use theme::Theme;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Profile => profile::render_profile(frame, app.theme, chunks[1]),
        Tab::Experience => profile::render_experience(frame, app.theme, chunks[1]),
        Tab::Projects => list::render_repositories(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);
}

/// Draw the status bar with keybinding hints and refresh state.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let key = |k: &'static str| Span::raw(k);
    let hint = |h: &'static str| Span::styled(h, Style::default().fg(theme.muted()));

    let mut hints = vec![key(" Tab "), hint("Switch")];
    if app.active_tab == Tab::Projects {
        hints.extend([key("  ↑↓ "), hint("Move"), key("  r "), hint("Refresh")]);
    }
    hints.extend([key("  t "), hint(theme.name()), key("  q "), hint("Quit")]);

    if app.is_refreshing() {
        hints.push(Span::styled(
            "  Refreshing…",
            Style::default().fg(theme.highlight()),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
