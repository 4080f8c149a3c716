//! Autosuggest CLI Library
//!
//! Reference hosts for the typeahead engine: an interactive terminal UI
//! (ratatui) and a headless replayer that prints emitted host commands.

pub mod app;
pub mod headless;
pub mod keymap;
pub mod source;
pub mod tui;
pub mod ui;
