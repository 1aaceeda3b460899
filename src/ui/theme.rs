//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Usage percentage at which a gauge turns to the warning color.
const USAGE_WARNING: f64 = 70.0;
/// Usage percentage at which a gauge turns to the critical color.
const USAGE_CRITICAL: f64 = 90.0;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for the loading indicator and help border.
    pub highlight: Color,
    /// Color for values in the normal range and an "up" agent.
    pub healthy: Color,
    /// Color for elevated usage.
    pub warning: Color,
    /// Color for errors, a "down" agent and the unconfigured view.
    pub critical: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Main text color.
    pub text: Color,
    /// Style for the server name and view titles.
    pub title: Style,
    /// Style for secondary labels ("Uptime", "read/s", ...).
    pub label: Style,
    /// Style for the least important text (timestamps).
    pub faint: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::Gray,
            text: Color::White,
            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            faint: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            healthy: Color::Green,
            warning: Color::Yellow,
            critical: Color::Red,
            border: Color::DarkGray,
            text: Color::Black,
            title: Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            faint: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for the agent status dot.
    pub fn status_style(&self, is_up: bool) -> Style {
        if is_up {
            Style::default().fg(self.healthy)
        } else {
            Style::default().fg(self.critical).add_modifier(Modifier::BOLD)
        }
    }

    /// Color for a usage percentage.
    pub fn usage_color(&self, percent: f64) -> Color {
        if percent >= USAGE_CRITICAL {
            self.critical
        } else if percent >= USAGE_WARNING {
            self.warning
        } else {
            self.healthy
        }
    }
}
