//! Terminal application state.
//!
//! [`App`] is the host the suggestion controller drives in interactive mode:
//! its input box is the text widget and its popup is the suggestion view.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use autosuggest_core::{EditBuffer, ListItem, Point, SuggestionView, TextWidget};

/// The suggestion popup as last instructed by the controller.
#[derive(Debug, Clone, Default)]
pub struct Popup {
    pub items: Vec<ListItem>,
    pub position: Point,
    pub visible: bool,
}

impl Popup {
    /// Index of the first highlighted item.
    pub fn highlighted(&self) -> Option<usize> {
        self.items.iter().position(|i| i.highlighted)
    }
}

/// TUI application state.
#[derive(Debug, Clone, Default)]
pub struct App {
    pub input: EditBuffer,
    pub popup: Popup,
    /// Top-left cell of the input text (set each frame by the renderer).
    pub input_origin: Point,
    pub should_quit: bool,
    pub status: String,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caret position in terminal cells relative to the input origin.
    pub fn caret_cells(&self) -> (usize, usize) {
        let caret = self.input.caret();
        let before: String = self.input.text().chars().take(caret).collect();
        let line = before.matches('\n').count();
        let column = before.rsplit('\n').next().map_or(0, UnicodeWidthStr::width);
        (line, column)
    }

    /// Selected char range of the input.
    pub fn selection(&self) -> Range<usize> {
        self.input.selection()
    }
}

fn to_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

impl TextWidget for App {
    fn text(&self) -> String {
        self.input.text().to_string()
    }

    fn set_text(&mut self, text: &str) {
        self.input.set_text(text);
    }

    fn select_range(&mut self, range: Range<usize>) {
        self.input.select(range);
    }

    fn origin(&self) -> Point {
        self.input_origin
    }

    fn caret_offset(&self) -> Point {
        let (line, column) = self.caret_cells();
        Point {
            top: to_i32(line),
            left: to_i32(column),
        }
    }
}

impl SuggestionView for App {
    fn render_list(&mut self, items: &[ListItem], position: Point) {
        self.popup.items = items.to_vec();
        self.popup.position = position;
        self.popup.visible = true;
    }

    fn hide_list(&mut self) {
        self.popup.visible = false;
    }

    fn set_highlighted(&mut self, index: usize, highlighted: bool) {
        if let Some(item) = self.popup.items.get_mut(index) {
            item.highlighted = highlighted;
        }
    }
}
