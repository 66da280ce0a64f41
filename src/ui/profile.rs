// Profile and experience tabs.
// Render the static portfolio content.

use ratatui::{prelude::*, widgets::*};

use crate::profile::{EDUCATION, EXPERIENCE, PROFILE};

use super::Theme;

pub fn render_profile(frame: &mut Frame, theme: Theme, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            PROFILE.name,
            Style::default()
                .fg(theme.accent())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            PROFILE.headline,
            Style::default().fg(theme.highlight()),
        )),
        Line::default(),
        Line::from(Span::styled(PROFILE.bio, Style::default().fg(theme.text()))),
        Line::default(),
    ];

    for link in PROFILE.links {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<10}", link.name),
                Style::default().fg(theme.muted()),
            ),
            Span::styled(link.url, Style::default().fg(theme.accent())),
        ]));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Profile "));
    frame.render_widget(widget, area);
}

pub fn render_experience(frame: &mut Frame, theme: Theme, area: Rect) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme.highlight())
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut lines = vec![heading("Experience"), Line::default()];
    // Newest first
    for job in EXPERIENCE.iter().rev() {
        lines.push(Line::from(vec![
            Span::styled(
                job.role,
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" · {} · {}", job.company, job.period),
                Style::default().fg(theme.muted()),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            job.description,
            Style::default().fg(theme.text()),
        )));
        lines.push(Line::default());
    }

    lines.push(heading("Education"));
    lines.push(Line::default());
    for school in EDUCATION {
        lines.push(Line::from(vec![
            Span::styled(
                school.degree,
                Style::default()
                    .fg(theme.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" · {} · {}", school.institution, school.period),
                Style::default().fg(theme.muted()),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            school.description,
            Style::default().fg(theme.text()),
        )));
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Career "));
    frame.render_widget(widget, area);
}
