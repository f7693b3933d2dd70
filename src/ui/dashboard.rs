use chrono::Local;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::clamp_name;
use super::theme::Theme;
use crate::app::App;
use crate::clock::Clock;
use crate::format::{format_clock, format_time, format_time_compact};
use crate::store::Store;

pub fn build_dashboard_text<S: Store, C: Clock>(app: &App<S, C>) -> Text<'_> {
    let mut lines = Vec::new();

    let now = Local::now();
    lines.push(Line::from(Span::styled(
        format!("  {}", now.format("%A, %B %e, %Y")),
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Current Timer"));
    match app.tracker.state().project_id() {
        Some(project) => {
            lines.push(Line::from(vec![
                Span::styled(
                    "  ● ",
                    Style::default()
                        .fg(Theme::active())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    project.as_str(),
                    Style::default()
                        .fg(Theme::text())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(
                    format_clock(app.elapsed()),
                    Style::default()
                        .fg(Theme::active())
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        None => lines.push(Line::from(Span::styled(
            "  No timer running",
            Style::default().fg(Theme::dim()),
        ))),
    }
    lines.push(Line::from(""));

    lines.push(section_title("Today"));
    lines.push(Line::from(vec![
        Span::styled("  Tracked: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format_time(app.today_seconds),
            Style::default()
                .fg(Theme::accent())
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Sessions: ", Style::default().fg(Theme::dim())),
        Span::styled(
            format!("{}", app.today_sessions),
            Style::default()
                .fg(Theme::success())
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(""));

    lines.push(section_title("Projects"));
    if app.project_totals.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No time tracked yet. Press n to start a timer.",
            Style::default().fg(Theme::dim()),
        )));
    }
    for (index, (project, seconds)) in app.project_totals.iter().enumerate() {
        let selected = index == app.selected_project_index;
        let running = app.tracker.state().is_running_for(project);
        let marker_style = if selected {
            Style::default()
                .fg(Theme::selection_marker())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::dim())
        };
        let name_style = if running {
            Style::default()
                .fg(Theme::active())
                .add_modifier(Modifier::BOLD)
        } else if selected {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::text())
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { "  > " } else { "    " }, marker_style),
            Span::styled(clamp_name(project.as_str(), 30), name_style),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", format_time_compact(*seconds)),
                Style::default().fg(Theme::accent()),
            ),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(section_title("Recent Sessions"));
    let recent = app.tracker.ledger().recent(5);
    if recent.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No sessions yet",
            Style::default().fg(Theme::dim()),
        )));
    }
    for session in recent {
        lines.push(Line::from(vec![
            Span::styled("  • ", Style::default().fg(Theme::dim())),
            Span::styled(
                clamp_name(session.project_id.as_str(), 24),
                Style::default().fg(Theme::text()),
            ),
            Span::raw(" "),
            Span::styled(
                session.start_time.format("%b %e %H:%M").to_string(),
                Style::default().fg(Theme::dim()),
            ),
            Span::raw(" "),
            Span::styled(
                format!("[{}]", format_time(session.duration)),
                Style::default().fg(Theme::accent()),
            ),
        ]));
    }

    Text::from(lines)
}

fn section_title(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(Theme::secondary())
            .add_modifier(Modifier::BOLD),
    ))
}
