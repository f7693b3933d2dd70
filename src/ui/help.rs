use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span, Text},
};

use super::theme::Theme;

pub fn build_help_text() -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        "Key bindings",
        Style::default()
            .fg(Theme::accent())
            .add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    lines.push(section_title("Global"));
    lines.extend(section_lines(&[
        "q: Quit",
        "?: Toggle help",
        "Tab: Switch between dashboard and sessions",
        "esc: Back",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Timer"));
    lines.extend(section_lines(&[
        "n: Start a timer for a project (stops the running one)",
        "Enter: Start the selected project on the dashboard",
        "s: Stop the running timer",
    ]));

    lines.push(Line::from(""));
    lines.push(section_title("Sessions"));
    lines.extend(section_lines(&[
        "Up/Down or k/j: Move selection",
        "d: Delete the selected session",
    ]));

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

fn section_lines(items: &[&str]) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            Line::from(Span::styled(
                format!("  - {item}"),
                Style::default().fg(Theme::text()),
            ))
        })
        .collect()
}
