//! Autosuggest Core Library
//!
//! Inline typeahead engine:
//! - Tokenizer splitting live input into committed text and the active fragment
//! - Pluggable candidate matching (case-insensitive prefix by default)
//! - Wraparound selection navigator
//! - Suggestion controller driving an abstract text widget and list view

pub mod buffer;
pub mod candidate;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod keys;
pub mod matcher;
pub mod navigator;
pub mod tokenizer;
pub mod tracing_init;


pub use buffer::EditBuffer;
pub use candidate::{Candidate, CandidateSet};
pub use config::{Options, Settings};
pub use controller::{KeyOutcome, SuggestionController};
pub use error::{Error, Result};
pub use host::{Host, HostCommand, ListItem, Point, RecordingHost, SuggestionView, TextWidget};
pub use keys::{Key, KeyEvent, Modifiers};
pub use tokenizer::ParseState;
