//! Plain text-input editing model.
//!
//! A string plus a char-offset selection, edited the way a native single
//! text input behaves: typing replaces the selection, backspace and delete
//! remove the selection first. Hosts without a native widget (the headless
//! replayer, the terminal UI) build on this.

use std::ops::Range;

use crate::keys::{Key, KeyEvent};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    /// Char offsets, always within the text.
    selection: Range<usize>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the caret at the end.
    pub fn with_text(text: &str) -> Self {
        let mut buffer = Self::new();
        buffer.set_text(text);
        buffer
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Caret position (start of the selection).
    pub const fn caret(&self) -> usize {
        self.selection.start
    }

    pub fn selected_text(&self) -> String {
        self.text
            .chars()
            .skip(self.selection.start)
            .take(self.selection.len())
            .collect()
    }

    /// Replace the text and put the caret at the end.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        let end = self.len_chars();
        self.selection = end..end;
    }

    /// Select `[start, end)`, clamped to the text.
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.len_chars();
        let start = range.start.min(len);
        let end = range.end.clamp(start, len);
        self.selection = start..end;
    }

    /// Zero-based line and column (in chars) of the caret.
    pub fn caret_line_col(&self) -> (usize, usize) {
        let before: String = self.text.chars().take(self.selection.start).collect();
        let line = before.matches('\n').count();
        let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
        (line, column)
    }

    fn replace_chars(&mut self, range: Range<usize>, with: &str) {
        let mut out: String = self.text.chars().take(range.start).collect();
        out.push_str(with);
        out.extend(self.text.chars().skip(range.end));
        self.text = out;
        let caret = range.start + with.chars().count();
        self.selection = caret..caret;
    }

    /// Insert `c`, replacing the selection.
    pub fn insert_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.replace_chars(self.selection(), c.encode_utf8(&mut tmp));
    }

    pub fn insert_str(&mut self, s: &str) {
        self.replace_chars(self.selection(), s);
    }

    /// Delete the selection, or the char before the caret.
    pub fn backspace(&mut self) {
        let Range { start, end } = self.selection;
        let from = if start == end { start.saturating_sub(1) } else { start };
        self.replace_chars(from..end, "");
    }

    /// Delete the selection, or the char after the caret.
    pub fn delete(&mut self) {
        let Range { start, end } = self.selection;
        let to = if start == end { (end + 1).min(self.len_chars()) } else { end };
        self.replace_chars(start..to, "");
    }

    /// Apply what a plain text input does with `event` by default.
    pub fn apply_default(&mut self, event: KeyEvent) {
        if let Some(c) = event.inserted_char() {
            self.insert_char(c);
            return;
        }
        let len = self.len_chars();
        let Range { start, end } = self.selection;
        match event.key {
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => {
                let to = if start == end { start.saturating_sub(1) } else { start };
                self.selection = to..to;
            }
            Key::Right => {
                let to = if start == end { (end + 1).min(len) } else { end };
                self.selection = to..to;
            }
            Key::Home => self.selection = 0..0,
            Key::End => self.selection = len..len,
            _ => {}
        }
    }
}
