//! Input handling for TUI key events.

use crossterm::event::{KeyCode, KeyModifiers};
use tracing::debug;

use autosuggest_core::SuggestionController;

use crate::app::App;
use crate::keymap;

/// Feed one terminal key press through the controller.
pub fn handle_key(
    app: &mut App,
    controller: &mut SuggestionController,
    key: crossterm::event::KeyEvent,
) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    let Some(event) = keymap::translate(key) else {
        debug!(?key, "Unmapped terminal key");
        return;
    };

    let outcome = controller.handle_key(app, event, |a| a.input.apply_default(event));
    debug!(?event, ?outcome, "Key handled");

    app.status = match controller.selected() {
        Some(candidate) if controller.is_list_visible() => format!(
            "{}/{} | {}",
            controller.cursor().map_or(0, |c| c + 1),
            controller.match_count(),
            candidate.display(controller.options().display_key())
        ),
        _ => format!("{} candidates", controller.candidates().len()),
    };
}
