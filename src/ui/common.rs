//! Common UI components shared across views.
//!
//! This module contains the unconfigured, loading and error views, the
//! status bar, the help overlay, and small formatting helpers used by both
//! dashboard layouts.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, View};

/// Status dot shown next to the server name.
pub const DOT: &str = "●";

/// Render the view shown when no configuration was supplied.
pub fn render_unconfigured(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .style(Style::default().bg(app.theme.critical).fg(ratatui::style::Color::White));

    let text = vec![
        Line::from(Span::styled(
            "Please configure the widget",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Pass --param '{\"beszelURL\":…,\"apiToken\":…,\"serverName\":…}'"),
        Line::from("or use --config / --url --token --server"),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

/// Render the view shown when the fetch had not settled at render time.
pub fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let name = app.snapshot.server_name().unwrap_or("Server");
    let lines = vec![
        Line::from(Span::styled(DOT, Style::default().fg(app.theme.highlight))),
        Line::from(""),
        Line::from(Span::styled(name.to_string(), app.theme.title)),
        Line::from(Span::styled("Loading...", app.theme.label)),
    ];
    render_centered_card(frame, app, area, lines);
}

/// Render the view shown when the fetch failed.
pub fn render_error(frame: &mut Frame, app: &App, area: Rect, message: &str) {
    let lines = vec![
        Line::from(Span::styled(DOT, Style::default().fg(app.theme.critical))),
        Line::from(""),
        Line::from(Span::styled(
            "Connection failed",
            Style::default().fg(app.theme.critical).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(message.to_string(), app.theme.label)),
    ];
    render_centered_card(frame, app, area, lines);
}

fn render_centered_card(frame: &mut Frame, app: &App, area: Rect, lines: Vec<Line>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let height = lines.len() as u16 + 2;
    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, body);
}

/// Render the status bar at the bottom.
///
/// Shows: capture time, current view, available controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let time = app.snapshot.captured_at().format("%H:%M:%S").to_string();

    let line = Line::from(vec![
        Span::styled(format!(" {} ", time), app.theme.faint),
        Span::raw("│ "),
        Span::raw(app.view.label()),
        Span::raw(" │ "),
        Span::raw("Tab:view ?:help q:quit"),
    ]);

    let paragraph = Paragraph::new(line).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("  Tab ←/→ h/l  Switch view"),
        Line::from(format!(
            "  1 / 2        {} / {}",
            View::Gauge.label(),
            View::Panel.label()
        )),
        Line::from("  ?            Toggle help"),
        Line::from("  q Esc        Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Data is fetched once per run",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 36u16.min(area.width.saturating_sub(4));
    let help_height = 11u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

/// Temperature text with the unit; Beszel reports 0 when no sensor exists.
pub fn temperature_text(temperature: f64) -> String {
    if temperature == 0.0 || !temperature.is_finite() {
        "--°C".to_string()
    } else {
        format!("{}°C", temperature)
    }
}

/// Convert a percentage into a gauge ratio in `[0, 1]`.
pub fn gauge_ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temperature_text() {
        assert_eq!(temperature_text(48.5), "48.5°C");
        assert_eq!(temperature_text(51.0), "51°C");
        assert_eq!(temperature_text(0.0), "--°C");
    }

    #[test]
    fn test_gauge_ratio_is_clamped() {
        assert_eq!(gauge_ratio(50.0), 0.5);
        assert_eq!(gauge_ratio(130.0), 1.0);
        assert_eq!(gauge_ratio(-5.0), 0.0);
        assert_eq!(gauge_ratio(f64::NAN), 0.0);
    }
}
