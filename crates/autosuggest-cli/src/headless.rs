//! Headless replay host.
//!
//! Replays a key script against a [`RecordingHost`] and reports, per key,
//! the commands the controller issued, one JSON object per line.

use std::io::Write;

use serde::Serialize;
use tracing::debug;

use autosuggest_core::keys::{Key, KeyEvent};
use autosuggest_core::{HostCommand, RecordingHost, SuggestionController, TextWidget};

/// Input for one replay run.
#[derive(Debug, Clone, Default)]
pub struct ReplayConfig {
    /// Whitespace-separated key script, e.g. `"new Space y Down Enter"`.
    pub keys: String,
    /// Text the widget holds before the first key.
    pub initial_text: String,
}

/// One scripted key and what the controller did with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub key: String,
    pub consumed: bool,
    pub commands: Vec<HostCommand>,
}

/// Widget state after the script ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalReport {
    pub text: String,
    pub selection: [usize; 2],
    pub list_visible: bool,
}

/// Parse a key script.
///
/// Each token is a key name (`Down`, `Ctrl+Space`, `Tab`, a single
/// character). Tokens that are not key names are typed one character at a
/// time, so `york` is `y o r k`. Key names win: type `e n d` for the word.
pub fn parse_script(script: &str) -> Vec<(String, KeyEvent)> {
    let mut events = Vec::new();
    for token in script.split_whitespace() {
        if let Ok(event) = token.parse::<KeyEvent>() {
            events.push((token.to_string(), event));
        } else {
            for c in token.chars() {
                events.push((c.to_string(), KeyEvent::plain(Key::Char(c))));
            }
        }
    }
    events
}

/// Run the script, returning one report per key plus the final state.
pub fn replay(
    controller: &mut SuggestionController,
    config: &ReplayConfig,
) -> (Vec<StepReport>, FinalReport) {
    let mut host = RecordingHost::with_text(&config.initial_text);
    let mut steps = Vec::new();

    for (label, event) in parse_script(&config.keys) {
        let outcome = controller.handle_key(&mut host, event, |h| h.apply_default(event));
        let commands = host.take_commands();
        debug!(key = %label, commands = commands.len(), "Replayed key");
        steps.push(StepReport {
            key: label,
            consumed: outcome.is_consumed(),
            commands,
        });
    }

    let selection = host.selection();
    let report = FinalReport {
        text: host.text(),
        selection: [selection.start, selection.end],
        list_visible: host.is_list_visible(),
    };
    (steps, report)
}

/// Run the script and write the JSON lines to `out`.
pub fn run<W: Write>(
    controller: &mut SuggestionController,
    config: &ReplayConfig,
    out: &mut W,
) -> anyhow::Result<()> {
    let (steps, report) = replay(controller, config);
    for step in &steps {
        serde_json::to_writer(&mut *out, step)?;
        writeln!(out)?;
    }
    serde_json::to_writer(&mut *out, &report)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
