// Repository list rendering.
// Provides the repo cards plus loading, error, and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::github::Repository;
use crate::state::RepoPhase;

use super::Theme;

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, theme: Theme, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.highlight()));
    frame.render_widget(text, area);
}

/// Render an error message with a retry hint.
pub fn render_error(frame: &mut Frame, area: Rect, theme: Theme, error: &str) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("❌ {}", error),
            Style::default().fg(theme.error()),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press r to retry",
            Style::default().fg(theme.muted()),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, theme: Theme, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.muted()));
    frame.render_widget(text, area);
}

/// One list row: name, description, then language and counters.
fn repo_item(repo: &Repository, theme: Theme) -> ListItem<'static> {
    let mut title = vec![Span::styled(
        repo.name.clone(),
        Style::default()
            .fg(theme.accent())
            .add_modifier(Modifier::BOLD),
    )];
    if repo.homepage_url().is_some() {
        title.push(Span::styled(" 🌐", Style::default().fg(theme.muted())));
    }

    let description = repo
        .description
        .clone()
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| "No description.".to_string());

    let stats = Line::from(vec![
        Span::styled(
            repo.language.clone().unwrap_or_else(|| "N/A".to_string()),
            Style::default().fg(theme.muted()),
        ),
        Span::raw("  "),
        Span::styled(
            format!("★ {}  ⑂ {}", repo.stargazers_count, repo.forks_count),
            Style::default().fg(theme.muted()),
        ),
    ]);

    ListItem::new(vec![
        Line::from(title),
        Line::from(Span::styled(description, Style::default().fg(theme.text()))),
        stats,
        Line::default(),
    ])
}

/// Render the Projects tab from the current repository state.
pub fn render_repositories(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme;
    let state = &app.repos;

    match state.phase() {
        RepoPhase::LoadingInitial | RepoPhase::Idle => {
            render_loading(frame, area, theme, "Loading repositories");
            return;
        }
        RepoPhase::Failed => {
            render_error(frame, area, theme, state.error.as_deref().unwrap_or_default());
            return;
        }
        RepoPhase::Ready | RepoPhase::LoadingRevalidate if state.repos.is_empty() => {
            render_empty(frame, area, theme, "No repositories found");
            return;
        }
        RepoPhase::Ready | RepoPhase::LoadingRevalidate => {}
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let mut title = format!(" {} · {} repositories ", app.account, state.repos.len());
    if let Some(fetched_at) = &state.fetched_at {
        title.push_str(&format!("· updated {} ", format_relative_time(fetched_at)));
    }

    let items: Vec<ListItem> = state
        .repos
        .iter()
        .map(|repo| repo_item(repo, theme))
        .collect();

    let list_widget = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .bg(theme.selection_bg())
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, chunks[0], &mut app.repo_list);

    // Links for the selected repository
    let links = match app.selected_repo() {
        Some(repo) => {
            let mut spans = vec![Span::styled(
                repo.html_url.clone(),
                Style::default().fg(theme.accent()),
            )];
            if let Some(homepage) = repo.homepage_url() {
                spans.push(Span::raw("  "));
                spans.push(Span::styled(
                    homepage.to_string(),
                    Style::default().fg(theme.muted()),
                ));
            }
            Line::from(spans)
        }
        None => Line::default(),
    };
    let links_widget = Paragraph::new(links).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted()))
            .title(" Links "),
    );
    frame.render_widget(links_widget, chunks[1]);
}
