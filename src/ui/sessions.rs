use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::helpers::clamp_name;
use super::theme::Theme;
use crate::app::App;
use crate::clock::Clock;
use crate::format::{format_hours, format_time};
use crate::store::Store;

pub fn build_sessions_text<S: Store, C: Clock>(app: &App<S, C>) -> Text<'_> {
    let mut lines = Vec::new();

    let sessions = app.sessions();
    if sessions.is_empty() {
        lines.push(Line::from(Span::styled(
            "No sessions recorded. Stop a timer to record one.",
            Style::default().fg(Theme::dim()),
        )));
        return Text::from(lines);
    }

    lines.push(Line::from(Span::styled(
        format!(
            "  {:<24} {:<17} {:<6} {:>12} {:>7}",
            "Project", "Start", "End", "Duration", "Hours"
        ),
        Style::default().fg(Theme::dim()),
    )));

    for (index, session) in sessions.iter().enumerate() {
        let selected = index == app.selected_session_index;
        let row_style = if selected {
            Style::default()
                .fg(Theme::highlight())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Theme::text())
        };
        lines.push(Line::from(vec![
            Span::styled(
                if selected { "> " } else { "  " },
                Style::default().fg(Theme::selection_marker()),
            ),
            Span::styled(
                format!(
                    "{} {:<17} {:<6} {:>12} {:>7}",
                    clamp_name(session.project_id.as_str(), 24),
                    session.start_time.format("%Y-%m-%d %H:%M").to_string(),
                    session.end_time.format("%H:%M").to_string(),
                    format_time(session.duration),
                    format_hours(session.duration),
                ),
                row_style,
            ),
        ]));
    }

    Text::from(lines)
}
