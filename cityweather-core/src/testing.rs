//! Test utilities for apps built on the dispatch loop
//!
//! - [`key`], [`char_key`], [`ctrl_key`], [`type_text`]: build key events
//! - [`RenderHarness`]: render into a `TestBackend` and read the screen back
//! - [`ActionAssertions`]: fluent assertions on emitted actions
//! - [`TestHarness`]: action channel plus state, for driving effect handlers
//!
//! ```ignore
//! use cityweather_core::testing::*;
//!
//! let actions = form.handle_event(&EventKind::Key(key("enter")), props);
//! actions.assert_first(Action::WeatherFetch("London".into()));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::Action;

/// Parse a key string like `"enter"`, `"ctrl+u"` or `"q"` into a `KeyEvent`.
///
/// Returns `None` for unknown key names.
pub fn parse_key_string(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    // "+" on its own is a character, not a separator
    let parts: Vec<&str> = if key_str == "+" {
        vec!["+"]
    } else {
        key_str.split('+').collect()
    };
    let key_part = parts.last()?.trim();

    let mut modifiers = KeyModifiers::empty();
    for part in &parts[..parts.len() - 1] {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => {}
        }
    }

    let code = match key_part {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        c if c.chars().count() == 1 => KeyCode::Char(c.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Create a `KeyEvent` from a key string.
///
/// Key names are case-insensitive, so use [`char_key`] for uppercase letters.
///
/// # Panics
///
/// Panics if the key string cannot be parsed.
pub fn key(s: &str) -> KeyEvent {
    parse_key_string(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with Ctrl modifier.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// One key event per character of `text`, case preserved.
pub fn type_text(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// Convert a buffer to plain text, one line per row, trailing spaces trimmed.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.y..area.y + area.height {
        let mut line = String::new();
        for x in area.x..area.x + area.width {
            line.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Renders into an in-memory terminal for assertions on screen content.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    ///
    /// # Panics
    ///
    /// Panics if the test terminal cannot be created.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal =
            Terminal::new(TestBackend::new(width, height)).expect("test terminal should build");
        Self { terminal }
    }

    /// Render one frame and return the buffer as plain text.
    ///
    /// # Panics
    ///
    /// Panics if drawing fails.
    pub fn render_to_string_plain<F>(&mut self, render: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        let completed = self.terminal.draw(render).expect("draw should succeed");
        buffer_to_string_plain(completed.buffer)
    }
}

/// Fluent assertions on a list of actions returned by a component.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, n: usize);
    fn assert_first(&self, expected: A);
}

impl<A: Action + PartialEq> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got {:?}", self);
    }

    fn assert_count(&self, n: usize) {
        assert_eq!(self.len(), n, "Expected {} actions, got {:?}", n, self);
    }

    fn assert_first(&self, expected: A) {
        assert_eq!(self.first(), Some(&expected), "Unexpected first action");
    }
}

/// Collects the actions that tasks send back to the loop.
pub struct TestHarness<A: Action> {
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<A: Action> TestHarness<A> {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Get a clone of the action sender for passing to handlers.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    /// Wait for the next action sent to the harness.
    pub async fn recv(&mut self) -> Option<A> {
        self.rx.recv().await
    }

    /// Drain all emitted actions from the channel.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }
}

impl<A: Action> Default for TestHarness<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that an action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            $actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` to be emitted, but got: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        assert!(
            !$actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
            "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
            stringify!($pattern),
            $actions
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_simple() {
        let k = key("q");
        assert_eq!(k.code, KeyCode::Char('q'));
        assert_eq!(k.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn test_key_with_ctrl() {
        let k = key("ctrl+u");
        assert_eq!(k.code, KeyCode::Char('u'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_key_special() {
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("enter").code, KeyCode::Enter);
        assert_eq!(key("backspace").code, KeyCode::Backspace);
        assert_eq!(key("+").code, KeyCode::Char('+'));
        assert!(parse_key_string("hyper+x+y+nonsense").is_none());
    }

    #[test]
    fn test_type_text_preserves_case() {
        let events = type_text("Ab");
        assert_eq!(
            events,
            vec![
                EventKind::Key(char_key('A')),
                EventKind::Key(char_key('b')),
            ]
        );
    }

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Foo,
        Bar(i32),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Foo => "Foo",
                TestAction::Bar(_) => "Bar",
            }
        }
    }

    #[test]
    fn test_harness_drain() {
        let mut harness = TestHarness::<TestAction>::new();
        let tx = harness.sender();
        tx.send(TestAction::Foo).unwrap();
        tx.send(TestAction::Bar(42)).unwrap();

        let actions = harness.drain_emitted();
        assert_eq!(actions, vec![TestAction::Foo, TestAction::Bar(42)]);
        assert!(harness.drain_emitted().is_empty());
    }

    #[test]
    fn test_assertions() {
        let actions = vec![TestAction::Foo, TestAction::Bar(42)];
        actions.assert_count(2);
        actions.assert_first(TestAction::Foo);
        assert_emitted!(actions, TestAction::Bar(_));
        assert_not_emitted!(actions, TestAction::Bar(99));

        let none: Vec<TestAction> = vec![];
        none.assert_empty();
    }

    #[test]
    fn test_render_harness() {
        use ratatui::widgets::Paragraph;

        let mut render = RenderHarness::new(20, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });
        assert_eq!(output, "hello\n\n");
    }
}
