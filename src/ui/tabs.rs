// Tab bar rendering.
// Highlights the active tab and marks Projects while a refresh is pending.

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Tab};

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let theme = app.theme;
    let busy = app.repos.loading || app.is_refreshing();

    let tab_titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            let title = if *tab == Tab::Projects && busy {
                format!("{} ⟳", tab.title())
            } else {
                tab.title().to_string()
            };

            let style = if *tab == app.active_tab {
                Style::default()
                    .fg(theme.highlight())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.text())
            };

            Line::from(Span::styled(title, style))
        })
        .collect();

    let selected_index = Tab::ALL
        .iter()
        .position(|t| *t == app.active_tab)
        .unwrap_or(0);

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.muted()))
                .title(" folio ")
                .title_style(
                    Style::default()
                        .fg(theme.accent())
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(selected_index)
        .highlight_style(Style::default().fg(theme.highlight()))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
