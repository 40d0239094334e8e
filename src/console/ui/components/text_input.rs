use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Style},
    text::Span,
};

/// Single-line input with cursor-aware editing.
///
/// Positions are counted in characters; edits convert to byte offsets at
/// the point of mutation so multibyte text stays intact.
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    text: String,
    cursor_position: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Replaces the text, leaving the cursor at the end.
    pub fn set_text(&mut self, text: String) {
        self.cursor_position = text.chars().count();
        self.text = text;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor_position = 0;
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the character at `position`.
    fn byte_index(&self, position: usize) -> usize {
        self.text
            .chars()
            .take(position)
            .map(|c| c.len_utf8())
            .sum()
    }

    /// Removes characters in `[start, end)`. Returns whether anything
    /// changed.
    fn delete_range(&mut self, start: usize, end: usize) -> bool {
        if start >= end || end > self.char_count() {
            return false;
        }
        let byte_start = self.byte_index(start);
        let byte_end = self.byte_index(end);
        self.text.drain(byte_start..byte_end);
        self.cursor_position = start;
        true
    }

    fn prev_word_boundary(&self, from: usize) -> usize {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = from;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        pos
    }

    /// Styled spans for the text with a block cursor.
    pub fn render_cursor_spans(&self) -> Vec<Span<'_>> {
        let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        let len = self.char_count();

        if self.text.is_empty() {
            return vec![Span::styled(" ", cursor_style)];
        }

        if self.cursor_position >= len {
            return vec![
                Span::raw(self.text.clone()),
                Span::styled(" ", cursor_style),
            ];
        }

        let before: String = self.text.chars().take(self.cursor_position).collect();
        let at: String = self
            .text
            .chars()
            .nth(self.cursor_position)
            .into_iter()
            .collect();
        let after: String = self.text.chars().skip(self.cursor_position + 1).collect();

        let mut spans = Vec::new();
        if !before.is_empty() {
            spans.push(Span::raw(before));
        }
        spans.push(Span::styled(at, cursor_style));
        if !after.is_empty() {
            spans.push(Span::raw(after));
        }
        spans
    }

    /// Applies a key event. Returns whether the text changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_control_key(key.code);
        }
        if key.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }

        match key.code {
            KeyCode::Char(c) => {
                let byte_pos = self.byte_index(self.cursor_position);
                self.text.insert(byte_pos, c);
                self.cursor_position += 1;
                true
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    self.delete_range(self.cursor_position - 1, self.cursor_position)
                } else {
                    false
                }
            }
            KeyCode::Delete => self.delete_range(self.cursor_position, self.cursor_position + 1),
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                false
            }
            KeyCode::Right => {
                if self.cursor_position < self.char_count() {
                    self.cursor_position += 1;
                }
                false
            }
            KeyCode::Home => {
                self.cursor_position = 0;
                false
            }
            KeyCode::End => {
                self.cursor_position = self.char_count();
                false
            }
            _ => false,
        }
    }

    fn handle_control_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('a') => {
                self.cursor_position = 0;
                false
            }
            KeyCode::Char('e') => {
                self.cursor_position = self.char_count();
                false
            }
            KeyCode::Char('b') => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                false
            }
            KeyCode::Char('f') => {
                if self.cursor_position < self.char_count() {
                    self.cursor_position += 1;
                }
                false
            }
            KeyCode::Char('h') => {
                if self.cursor_position > 0 {
                    self.delete_range(self.cursor_position - 1, self.cursor_position)
                } else {
                    false
                }
            }
            KeyCode::Char('w') => {
                let boundary = self.prev_word_boundary(self.cursor_position);
                self.delete_range(boundary, self.cursor_position)
            }
            KeyCode::Char('u') => self.delete_range(0, self.cursor_position),
            KeyCode::Char('k') => self.delete_range(self.cursor_position, self.char_count()),
            _ => false,
        }
    }
}
