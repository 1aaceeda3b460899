//! Terminal UI rendering using ratatui.
//!
//! This module contains the rendering logic for every widget state. The
//! ready state has two interchangeable layouts, each in its own submodule.
//!
//! ## Submodules
//!
//! - [`gauge`]: Gauges for load, memory and disk under a name/uptime header
//! - [`panel`]: Side-by-side panels with progress bars and key facts
//! - [`common`]: Unconfigured/loading/error views, status bar, help overlay
//! - [`theme`]: Light/dark theme support with terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │                                      │
//! │ State view                           │
//! │ Unconfigured | Loading | Error       │
//! │ Ready → gauge::render / panel::render│
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod common;
pub mod gauge;
pub mod panel;
pub mod theme;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, View, WidgetState};

/// Minimum terminal width for a usable display.
pub const MIN_WIDTH: u16 = 40;
/// Minimum terminal height for a usable display.
pub const MIN_HEIGHT: u16 = 12;

/// Draw one frame for the app's snapshot.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Check for minimum terminal size
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = format!(
            "Terminal too small: {}x{}\nMinimum: {}x{}",
            area.width, area.height, MIN_WIDTH, MIN_HEIGHT
        );
        let paragraph = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow));
        let centered = Rect::new(0, area.height.saturating_sub(2) / 2, area.width, 2);
        frame.render_widget(paragraph, centered.intersection(area));
        return;
    }

    let [content, status_bar] =
        Layout::vertical([Constraint::Min(8), Constraint::Length(1)]).areas(area);

    match app.snapshot.state() {
        WidgetState::Unconfigured => common::render_unconfigured(frame, app, content),
        WidgetState::Loading => common::render_loading(frame, app, content),
        WidgetState::Error(message) => common::render_error(frame, app, content, message),
        WidgetState::Ready(status) => match app.view {
            View::Gauge => gauge::render(frame, app, content, status),
            View::Panel => panel::render(frame, app, content, status),
        },
    }

    common::render_status_bar(frame, app, status_bar);

    if app.show_help {
        common::render_help(frame, app, area);
    }
}
