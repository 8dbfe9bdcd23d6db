//! Event handling for the TUI.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::app::{App, Field, InputMode};

/// Handle keyboard events.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Global shortcuts (work in all modes)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if app.input_mode == InputMode::Normal => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing(_) => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Tab navigation
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_tab(),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_tab(),
        KeyCode::Char(c @ '1'..='3') => app.goto_tab(c as u8 - b'0'),

        // Sidebar inputs
        KeyCode::Char('t') => app.begin_edit(Field::Ticker),
        KeyCode::Char('s') => app.begin_edit(Field::Start),
        KeyCode::Char('e') => app.begin_edit(Field::End),
        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('k') => app.adjust_horizon(1),
        KeyCode::Down | KeyCode::Char('-') | KeyCode::Char('j') => app.adjust_horizon(-1),

        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('x') => app.export_chart(),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Backspace => {
            app.edit_buffer.pop();
        }
        KeyCode::Char(c) => app.edit_buffer.push(c),
        _ => {}
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Tab;
    use crate::config::DashboardConfig;
    use crate::pipeline::Inputs;
    use crate::testing::{date, SyntheticSource};
    use std::path::PathBuf;

    fn new_app() -> App {
        let config = DashboardConfig {
            inputs: Inputs {
                ticker: "AAPL".to_string(),
                start: date(2024, 1, 1),
                end: date(2024, 7, 1),
                horizon: 7,
            },
            api_url: String::new(),
            log_file: PathBuf::from("test.log"),
            headless: false,
            export: None,
            today: date(2024, 10, 18),
        };
        let mut app = App::new(&config, Box::new(SyntheticSource::default()));
        app.refresh();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = new_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.current_tab, Tab::Model);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.current_tab, Tab::Prices);
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.current_tab, Tab::Forecast);
    }

    #[test]
    fn test_q_is_text_while_editing() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('t'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "qqq");
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.inputs.ticker, "QQQ");
        assert!(app.refresh_pending);
    }

    #[test]
    fn test_edit_start_date() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.input_mode, InputMode::Editing(Field::Start));
        for _ in 0..10 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "2024-02-01");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.inputs.start, date(2024, 2, 1));
    }

    #[test]
    fn test_escape_discards_edit() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, "junk");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.inputs.end, date(2024, 7, 1));
        assert!(!app.refresh_pending);
    }

    #[test]
    fn test_horizon_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.inputs.horizon, 9);
        for _ in 0..20 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.inputs.horizon, 1);
        for _ in 0..40 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.inputs.horizon, 30);
    }

    #[test]
    fn test_reload_key() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.refresh_pending);
        assert_eq!(app.cached_series(), 0);
    }
}
