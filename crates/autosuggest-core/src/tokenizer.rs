//! Input tokenizer.
//!
//! Splits the widget's full text into the already-committed words and the
//! fragment currently being typed. Words are delimited by the space character
//! only; tabs and other whitespace stay inside words. A line break in the last
//! word is a hard boundary: everything up to and including it is committed.

use serde::Serialize;

/// State derived from the widget text on every reparse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseState {
    /// All words before the active fragment, re-joined with single spaces.
    pub committed_text: String,
    /// The word currently being completed.
    pub active_fragment: String,
    /// Char offset where the suggested (highlighted) part starts after a
    /// candidate is spliced in: `len(committed_text) + len(active_fragment)`.
    pub active_start: usize,
}

impl ParseState {
    /// Text to place in the widget when previewing or accepting `display`.
    pub fn splice(&self, display: &str) -> String {
        let mut text = String::with_capacity(self.committed_text.len() + display.len());
        text.push_str(&self.committed_text);
        text.push_str(display);
        text
    }
}

/// Parse the full widget text into a [`ParseState`].
pub fn parse(full_text: &str) -> ParseState {
    let mut tokens: Vec<&str> = full_text.split(' ').collect();

    if let Some(last) = tokens.pop() {
        match last.rfind('\n') {
            Some(idx) => {
                let cut = idx + '\n'.len_utf8();
                tokens.push(&last[..cut]);
                tokens.push(if cut < last.len() { &last[cut..] } else { " " });
            }
            None => tokens.push(last),
        }
    }

    let (active, committed) = match tokens.split_last() {
        Some((active, committed)) => (*active, committed),
        None => ("", &[][..]),
    };

    let mut committed_text = committed.join(" ");
    if !committed.is_empty() && !committed_text.ends_with('\n') {
        committed_text.push(' ');
    }

    let active_start = committed_text.chars().count() + active.chars().count();
    ParseState {
        committed_text,
        active_fragment: active.to_string(),
        active_start,
    }
}
