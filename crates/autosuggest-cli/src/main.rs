//! Autosuggest CLI
//!
//! Inline typeahead in the terminal. Runs the interactive TUI by default, or
//! replays a key script headlessly and prints the resulting host commands.

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use autosuggest_core::config::load_settings;
use autosuggest_core::tracing_init::{init_file_tracing, init_tracing};
use autosuggest_core::{Options, SuggestionController};

use autosuggest_cli::headless::{self, ReplayConfig};
use autosuggest_cli::{source, tui};

const FILE_LOG_FILTER: &str = "autosuggest=info,autosuggest_core=info,autosuggest_cli=info";
const STDERR_LOG_FILTER: &str = "autosuggest=warn,autosuggest_core=warn,autosuggest_cli=warn";

/// List offset used by the TUI: one row below the caret.
const TUI_LIST_OFFSET: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "autosuggest")]
#[command(version, about = "Inline typeahead for the terminal", long_about = None)]
struct Cli {
    /// Candidate file (`.json` array, otherwise one candidate per line)
    #[arg(short, long, global = true)]
    candidates: Option<PathBuf>,

    /// Record field shown for object candidates
    #[arg(short = 'k', long, global = true)]
    display_key: Option<String>,

    /// Settings file layered over the global settings
    #[arg(long, global = true, env = "AUTOSUGGEST_CONFIG")]
    config: Option<PathBuf>,

    /// Rows between the caret and the suggestion list
    #[arg(long, global = true, allow_hyphen_values = true)]
    list_offset: Option<i32>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    /// Write logs to this file (the TUI logs nowhere otherwise)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal input with suggestions (default)
    Tui,
    /// Replay a key script and print the host commands as JSON lines
    Replay {
        /// Whitespace-separated keys, e.g. "new Space y Down Enter"
        #[arg(long)]
        keys: String,
        /// Initial widget text
        #[arg(long, default_value = "")]
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Tui);
    let interactive = matches!(command, Command::Tui);

    // The TUI owns the terminal; only log there when asked to log to a file.
    match (&cli.log_file, interactive) {
        (Some(path), _) => init_file_tracing(FILE_LOG_FILTER, cli.log_json, path)?,
        (None, false) => init_tracing(STDERR_LOG_FILTER, cli.log_json),
        (None, true) => {}
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting autosuggest");

    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(key) = cli.display_key {
        settings.display_key = Some(key);
    }
    settings.list_offset = match (cli.list_offset, interactive) {
        (Some(offset), _) => offset,
        (None, true) => TUI_LIST_OFFSET,
        (None, false) => settings.list_offset,
    };

    let candidates = source::resolve_candidates(cli.candidates.as_deref())?;
    info!(count = candidates.len(), "Loaded candidates");
    let mut controller = SuggestionController::new(candidates, Options::from_settings(&settings));

    match command {
        Command::Tui => tui::run(&mut controller),
        Command::Replay { keys, text } => {
            let config = ReplayConfig {
                keys,
                initial_text: text,
            };
            headless::run(&mut controller, &config, &mut io::stdout().lock())
        }
    }
}
