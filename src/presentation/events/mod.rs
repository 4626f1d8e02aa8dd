//! Key classification.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Key bindings of the single screen.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key should terminate the application.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key closes the current view (panel first, then the app).
    #[must_use]
    pub fn is_back_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Esc,
                ..
            }
        )
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }

    /// Checks if key opens or closes the saved images panel.
    #[must_use]
    pub fn is_toggle_panel_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Tab,
                ..
            } | KeyEvent {
                code: KeyCode::Char('o'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Returns false for release and repeat notifications some terminals send.
    #[must_use]
    pub fn is_press(key: &KeyEvent) -> bool {
        key.kind == KeyEventKind::Press
    }
}
