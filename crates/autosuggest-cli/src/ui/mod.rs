//! TUI rendering components.

mod render;

pub use render::{draw, input_lines, popup_area};
