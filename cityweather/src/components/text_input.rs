//! Single-line text input that owns the text being typed
//!
//! The value is local UI state: typing never produces an action, only
//! `Enter` does, through `on_submit`.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use cityweather_core::EventKind;

pub struct TextInputProps<'a, A> {
    /// Placeholder text when empty
    pub placeholder: &'a str,
    pub title: &'a str,
    pub is_focused: bool,
    /// Dim the box (input still accepts edits)
    pub is_dimmed: bool,
    /// Callback when user submits (Enter)
    pub on_submit: fn(String) -> A,
}

/// A single-line text input with cursor
#[derive(Debug, Default)]
pub struct TextInput {
    value: String,
    /// Cursor position (byte index, always on a char boundary)
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replace the value and put the cursor at the end
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn move_cursor_left(&mut self) {
        if let Some((i, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_cursor_right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.value.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Backspace
    fn delete_char_before(&mut self) {
        if let Some((i, _)) = self.value[..self.cursor].char_indices().next_back() {
            self.value.remove(i);
            self.cursor = i;
        }
    }

    /// Delete key
    fn delete_char_at(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

impl<A> Component<A> for TextInput {
    type Props<'a> = TextInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }

        let key = match event {
            EventKind::Key(key) => key,
            EventKind::Paste(text) => {
                self.insert_str(text);
                return None;
            }
            EventKind::Resize(..) => return None,
        };

        // AltGr arrives as Ctrl+Alt on Windows and must still type its character
        let is_ctrl_binding = key.modifiers.contains(KeyModifiers::CONTROL)
            && !key.modifiers.contains(KeyModifiers::ALT);
        if is_ctrl_binding {
            match key.code {
                KeyCode::Char('a') => self.cursor = 0,
                KeyCode::Char('e') => self.cursor = self.value.len(),
                KeyCode::Char('u') => self.clear(),
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char(c) => {
                let mut buf = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut buf));
            }
            KeyCode::Backspace => self.delete_char_before(),
            KeyCode::Delete => self.delete_char_at(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            KeyCode::Enter => return Some((props.on_submit)(self.value.clone())),
            _ => {}
        }
        None
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let (display_text, mut style) = if self.value.is_empty() {
            (props.placeholder, Style::default().fg(Color::DarkGray))
        } else {
            (self.value.as_str(), Style::default())
        };
        if props.is_dimmed {
            style = style.add_modifier(Modifier::DIM);
        }

        let border_style = if props.is_focused && !props.is_dimmed {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(props.title);

        frame.render_widget(Paragraph::new(display_text).style(style).block(block), area);

        if props.is_focused && area.width > 2 && area.height > 2 {
            let column = self.value[..self.cursor].chars().count();
            let column = u16::try_from(column).unwrap_or(u16::MAX);
            let cursor_x = area.x.saturating_add(1).saturating_add(column);
            // Keep the cursor inside the right border
            if cursor_x < area.right().saturating_sub(1) {
                frame.set_cursor_position((cursor_x, area.y + 1));
            }
        }
    }
}
