//! Gauge view rendering.
//!
//! Header with name, temperature and status dot, an uptime row, three
//! gauges (Load, Mem, Disk) side by side, and an I/O footer.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::NormalizedStatus;
use crate::ui::common::{gauge_ratio, temperature_text, DOT};

/// Render the gauge view for a ready snapshot.
pub fn render(frame: &mut Frame, app: &App, area: Rect, status: &NormalizedStatus) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header, uptime, gauges, io] = Layout::vertical([
        Constraint::Length(1), // Name, temperature, status
        Constraint::Length(1), // Uptime
        Constraint::Min(3),    // Gauges
        Constraint::Length(2), // Read/write + load
    ])
    .spacing(1)
    .areas(inner);

    render_header(frame, app, header, status);
    render_uptime(frame, app, uptime, status);
    render_gauges(frame, app, gauges, status);
    render_io(frame, app, io, status);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect, status: &NormalizedStatus) {
    let temperature = temperature_text(status.temperature);
    let right_width = temperature.chars().count() as u16 + 3;
    let [left, right] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(right_width)]).areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(status.name.clone(), app.theme.title)),
        left,
    );
    let right_line = Line::from(vec![
        Span::styled(temperature, Style::default().fg(app.theme.text)),
        Span::raw(" "),
        Span::styled(DOT, app.theme.status_style(status.is_up())),
    ])
    .right_aligned();
    frame.render_widget(Paragraph::new(right_line), right);
}

fn render_uptime(frame: &mut Frame, app: &App, area: Rect, status: &NormalizedStatus) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(12)]).areas(area);
    frame.render_widget(
        Paragraph::new(Span::styled("Uptime", app.theme.label)),
        left,
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                status.uptime.clone(),
                Style::default().fg(app.theme.healthy).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        right,
    );
}

fn render_gauges(frame: &mut Frame, app: &App, area: Rect, status: &NormalizedStatus) {
    let columns = Layout::horizontal([Constraint::Fill(1); 3])
        .spacing(1)
        .split(area);

    let gauges = [
        ("Load", status.cpu_percent, format!("{:.1}%", status.cpu_percent)),
        ("Mem", status.memory_percent, format!("{:.0}%", status.memory_percent)),
        ("Disk", status.disk_percent, format!("{:.0}%", status.disk_percent)),
    ];

    for ((title, percent, label), column) in gauges.into_iter().zip(columns.iter()) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(format!(" {} ", title))
                    .borders(Borders::ALL)
                    .border_type(app.theme.border_type)
                    .border_style(Style::default().fg(app.theme.border)),
            )
            .gauge_style(Style::default().fg(app.theme.usage_color(percent)))
            .ratio(gauge_ratio(percent))
            .label(Span::styled(label, Style::default().add_modifier(Modifier::BOLD)));
        frame.render_widget(gauge, *column);
    }
}

fn render_io(frame: &mut Frame, app: &App, area: Rect, status: &NormalizedStatus) {
    let arrow = Style::default().fg(app.theme.healthy);
    let lines = vec![
        Line::from(vec![
            Span::styled("⬇ ", arrow),
            Span::styled(status.read_speed.clone(), Style::default().fg(app.theme.text)),
            Span::styled(" read   ", app.theme.label),
            Span::styled("⬆ ", arrow),
            Span::styled(status.write_speed.clone(), Style::default().fg(app.theme.text)),
            Span::styled(" write", app.theme.label),
        ]),
        Line::from(vec![
            Span::styled("Load avg ", app.theme.label),
            Span::styled(status.load.clone(), Style::default().fg(app.theme.text)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
