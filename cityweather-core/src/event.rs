//! Terminal events as seen by components

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// The event payload delivered to `Component::handle_event`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Keyboard event (press or repeat, never release)
    Key(KeyEvent),
    /// Bracketed paste
    Paste(String),
    /// Terminal resize
    Resize(u16, u16),
}

impl EventKind {
    /// Check if this is a quit chord that should work regardless of focus
    pub fn is_quit(&self) -> bool {
        match self {
            EventKind::Key(key) => {
                key.code == KeyCode::Esc
                    || (key.modifiers.contains(KeyModifiers::CONTROL)
                        && matches!(key.code, KeyCode::Char('c')))
            }
            _ => false,
        }
    }

    /// Check if this is a key event that should be handed to components
    pub fn is_key_press(&self) -> bool {
        matches!(self, EventKind::Key(key) if key.kind != KeyEventKind::Release)
    }
}
