use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Windows reports both press and release
    if key.kind == KeyEventKind::Release {
        return;
    }

    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab
        | KeyCode::BackTab
        | KeyCode::Left
        | KeyCode::Right
        | KeyCode::Char('h')
        | KeyCode::Char('l') => app.toggle_view(),

        // Direct view access
        KeyCode::Char('1') => app.view = View::Gauge,
        KeyCode::Char('2') => app.view = View::Panel,

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RenderSnapshot;
    use crate::ui::Theme;

    fn app() -> App {
        App::with_theme(RenderSnapshot::unconfigured(), View::Gauge, Theme::dark())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('q'));
        assert!(!a.running);

        let mut a = app();
        press(&mut a, KeyCode::Esc);
        assert!(!a.running);

        let mut a = app();
        handle_key_event(
            &mut a,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!a.running);
    }

    #[test]
    fn test_view_switching() {
        let mut a = app();
        press(&mut a, KeyCode::Tab);
        assert_eq!(a.view, View::Panel);
        press(&mut a, KeyCode::Char('l'));
        assert_eq!(a.view, View::Gauge);
        press(&mut a, KeyCode::Char('2'));
        assert_eq!(a.view, View::Panel);
        press(&mut a, KeyCode::Char('1'));
        assert_eq!(a.view, View::Gauge);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut a = app();
        press(&mut a, KeyCode::Char('?'));
        assert!(a.show_help);

        press(&mut a, KeyCode::Char('q'));
        assert!(!a.show_help);
        assert!(a.running);
    }
}
