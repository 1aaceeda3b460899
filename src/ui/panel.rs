//! Panel view rendering.
//!
//! Two panels side by side: identity plus CPU and memory bars on the left,
//! uptime, temperature and disk usage on the right.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::NormalizedStatus;
use crate::ui::common::{gauge_ratio, temperature_text, DOT};

/// Render the panel view for a ready snapshot.
pub fn render(frame: &mut Frame, app: &App, area: Rect, status: &NormalizedStatus) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    render_usage_panel(frame, app, left, status);
    render_facts_panel(frame, app, right, status);
}

fn panel_block(app: &App) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border))
}

fn render_usage_panel(frame: &mut Frame, app: &App, area: Rect, status: &NormalizedStatus) {
    let block = panel_block(app);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [name, state, cpu_label, cpu_bar, mem_label, mem_bar] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(status.name.clone(), app.theme.title)),
        name,
    );
    let state_text = if status.is_up() { "online" } else { "offline" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(DOT, app.theme.status_style(status.is_up())),
            Span::raw(" "),
            Span::styled(state_text, app.theme.label),
        ])),
        state,
    );

    render_usage_row(frame, app, cpu_label, cpu_bar, "CPU", status.cpu_percent);
    render_usage_row(frame, app, mem_label, mem_bar, "Memory", status.memory_percent);
}

fn render_usage_row(
    frame: &mut Frame,
    app: &App,
    label_area: Rect,
    bar_area: Rect,
    label: &str,
    percent: f64,
) {
    let [left, right] =
        Layout::horizontal([Constraint::Min(1), Constraint::Length(8)]).areas(label_area);
    frame.render_widget(
        Paragraph::new(Span::styled(label.to_string(), app.theme.label)),
        left,
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                format!("{:.1}%", percent),
                Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
            ))
            .right_aligned(),
        ),
        right,
    );

    let bar = LineGauge::default()
        .filled_style(Style::default().fg(app.theme.usage_color(percent)))
        .unfilled_style(Style::default().fg(app.theme.border))
        .line_set(symbols::line::THICK)
        .label("")
        .ratio(gauge_ratio(percent));
    frame.render_widget(bar, bar_area);
}

fn render_facts_panel(frame: &mut Frame, app: &App, area: Rect, status: &NormalizedStatus) {
    let value = Style::default().fg(app.theme.healthy).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Uptime", app.theme.label)),
        Line::from(Span::styled(
            status.uptime.clone(),
            Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Temp", app.theme.faint)),
        Line::from(Span::styled(temperature_text(status.temperature), value)),
        Line::from(""),
        Line::from(Span::styled("Disk", app.theme.faint)),
        Line::from(Span::styled(format!("{:.1}%", status.disk_percent), value)),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(panel_block(app));
    frame.render_widget(paragraph, area);
}
