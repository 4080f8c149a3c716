//! Interfaces the engine requires from its host UI layer.
//!
//! The controller reads and writes the text widget through [`TextWidget`] and
//! drives the suggestion list through [`SuggestionView`]. Both are expected to
//! take effect synchronously. All text offsets are in chars.

use std::ops::Range;

use serde::Serialize;

use crate::buffer::EditBuffer;
use crate::keys::KeyEvent;

/// Screen coordinates, in whatever unit the host uses (pixels, cells).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Point {
    pub top: i32,
    pub left: i32,
}

/// Where the suggestion list should be placed.
pub type ListPosition = Point;

/// Renderable form of one candidate in the match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub label: String,
    pub highlighted: bool,
}

/// The text input the engine is bound to.
pub trait TextWidget {
    /// Full text content.
    fn text(&self) -> String;

    /// Replace the full text content.
    fn set_text(&mut self, text: &str);

    /// Select the char range `[start, end)`; an empty range places the caret.
    fn select_range(&mut self, range: Range<usize>);

    /// Whether the widget can select a text range. Hosts that cannot get no
    /// inline preview; the list still renders and stays navigable.
    fn can_select(&self) -> bool {
        true
    }

    /// Position of the widget itself.
    fn origin(&self) -> Point {
        Point::default()
    }

    /// Caret coordinates relative to the widget.
    fn caret_offset(&self) -> Point {
        Point::default()
    }
}

/// The suggestion list the engine drives.
pub trait SuggestionView {
    /// Show `items` at `position`, replacing any previous list.
    fn render_list(&mut self, items: &[ListItem], position: ListPosition);

    fn hide_list(&mut self);

    /// Mark or unmark the item at `index` as highlighted.
    fn set_highlighted(&mut self, index: usize, highlighted: bool);
}

/// Anything that is both a text widget and a suggestion view.
pub trait Host: TextWidget + SuggestionView {}

impl<T: TextWidget + SuggestionView> Host for T {}

/// A state-changing instruction emitted to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    SetText { text: String },
    SelectRange { start: usize, end: usize },
    RenderList { items: Vec<ListItem>, position: ListPosition },
    HideList,
    SetHighlighted { index: usize, highlighted: bool },
}

/// In-memory host that records every command it receives.
///
/// Tracks the text, selection and list exactly as a real widget would, and
/// edits text through an [`EditBuffer`] the way a text input does.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    buffer: EditBuffer,
    items: Vec<ListItem>,
    visible: bool,
    selectable: bool,
    origin: Point,
    commands: Vec<HostCommand>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            buffer: EditBuffer::new(),
            items: Vec::new(),
            visible: false,
            selectable: true,
            origin: Point::default(),
            commands: Vec::new(),
        }
    }

    /// A host whose widget starts out holding `text`, caret at the end.
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: EditBuffer::with_text(text),
            ..Self::new()
        }
    }

    /// A host that cannot select text ranges.
    #[must_use]
    pub fn without_selection(mut self) -> Self {
        self.selectable = false;
        self
    }

    #[must_use]
    pub fn at(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub const fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn selection(&self) -> Range<usize> {
        self.buffer.selection()
    }

    pub fn selected_text(&self) -> String {
        self.buffer.selected_text()
    }

    pub fn items(&self) -> &[ListItem] {
        &self.items
    }

    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.label.as_str()).collect()
    }

    /// Index of the highlighted item, if exactly one is highlighted.
    pub fn highlighted(&self) -> Option<usize> {
        let mut it = self.items.iter().enumerate().filter(|(_, i)| i.highlighted);
        match (it.next(), it.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    pub const fn is_list_visible(&self) -> bool {
        self.visible
    }

    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Let the widget handle `event` as it would without the engine.
    pub fn apply_default(&mut self, event: KeyEvent) {
        self.buffer.apply_default(event);
    }
}

impl TextWidget for RecordingHost {
    fn text(&self) -> String {
        self.buffer.text().to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.commands.push(HostCommand::SetText {
            text: text.to_string(),
        });
    }

    fn select_range(&mut self, range: Range<usize>) {
        self.commands.push(HostCommand::SelectRange {
            start: range.start,
            end: range.end,
        });
        self.buffer.select(range);
    }

    fn can_select(&self) -> bool {
        self.selectable
    }

    fn origin(&self) -> Point {
        self.origin
    }

    fn caret_offset(&self) -> Point {
        let (line, column) = self.buffer.caret_line_col();
        Point {
            top: i32::try_from(line).unwrap_or(i32::MAX),
            left: i32::try_from(column).unwrap_or(i32::MAX),
        }
    }
}

impl SuggestionView for RecordingHost {
    fn render_list(&mut self, items: &[ListItem], position: ListPosition) {
        self.items = items.to_vec();
        self.visible = true;
        self.commands.push(HostCommand::RenderList {
            items: items.to_vec(),
            position,
        });
    }

    fn hide_list(&mut self) {
        self.visible = false;
        self.commands.push(HostCommand::HideList);
    }

    fn set_highlighted(&mut self, index: usize, highlighted: bool) {
        if let Some(item) = self.items.get_mut(index) {
            item.highlighted = highlighted;
        }
        self.commands.push(HostCommand::SetHighlighted { index, highlighted });
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::keys::Key;

    #[test]
    fn set_text_is_recorded() {
        let mut host = RecordingHost::new();
        host.set_text("abc");
        assert_eq!(host.selection(), 3..3);
        assert_eq!(
            host.commands(),
            &[HostCommand::SetText {
                text: "abc".to_string()
            }]
        );
    }

    #[test]
    fn select_range_records_requested_range() {
        let mut host = RecordingHost::with_text("abc");
        host.select_range(1..9);
        assert_eq!(host.selection(), 1..3);
        assert_eq!(host.commands(), &[HostCommand::SelectRange { start: 1, end: 9 }]);
    }

    #[test]
    fn default_action_edits_buffer() {
        let mut host = RecordingHost::with_text("New York");
        host.select_range(1..8);
        host.apply_default(KeyEvent::plain(Key::Char('e')));
        assert_eq!(host.text(), "Ne");
        assert_eq!(host.selected_text(), "");
    }

    #[test]
    fn caret_offset_tracks_lines() {
        let host = RecordingHost::with_text("ab\ncde");
        assert_eq!(host.caret_offset(), Point { top: 1, left: 3 });
    }

    #[test]
    fn highlight_updates_items() {
        let mut host = RecordingHost::new();
        let items = vec![
            ListItem {
                label: "a".into(),
                highlighted: true,
            },
            ListItem {
                label: "b".into(),
                highlighted: false,
            },
        ];
        host.render_list(&items, Point::default());
        host.set_highlighted(0, false);
        host.set_highlighted(1, true);
        assert_eq!(host.highlighted(), Some(1));
        assert_eq!(host.labels(), vec!["a", "b"]);
        host.hide_list();
        assert!(!host.is_list_visible());
    }

    #[test]
    fn commands_serialize_tagged() {
        let json = serde_json::to_string(&HostCommand::SelectRange { start: 1, end: 4 }).unwrap();
        assert_eq!(json, r#"{"command":"select_range","start":1,"end":4}"#);
        let json = serde_json::to_string(&HostCommand::HideList).unwrap();
        assert_eq!(json, r#"{"command":"hide_list"}"#);
    }
}
