//! Interactive terminal host.
//!
//! A single-threaded loop: draw, block on the next terminal event, feed key
//! presses through the suggestion controller, repeat until the user quits.

mod input;

use std::io;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{error, info};

use autosuggest_core::SuggestionController;

use crate::app::App;
use crate::ui;

pub use input::handle_key;

/// Run the interactive TUI until Ctrl+C.
pub fn run(controller: &mut SuggestionController) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.status = format!("{} candidates", controller.candidates().len());
    info!(candidates = controller.candidates().len(), "TUI started");

    let result: anyhow::Result<()> = loop {
        if let Err(e) = terminal.draw(|f| ui::draw(f, &mut app)) {
            break Err(e.into());
        }
        match event::read() {
            Ok(Event::Key(key)) => {
                // Filter out Release events (Windows emits Press + Release per keystroke)
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    handle_key(&mut app, controller, key);
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!(?e, "Terminal read failed");
                break Err(e.into());
            }
        }
        if app.should_quit {
            break Ok(());
        }
    };

    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    info!(text = %app.input.text(), "TUI finished");
    result
}
