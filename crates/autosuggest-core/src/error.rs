//! Error types for the autosuggest core library.
//!
//! The suggestion state machine itself never fails; these errors only come
//! from the edges (loading settings, reading candidate sources, compiling a
//! fragment pattern).

use thiserror::Error;

/// Result type alias using the autosuggest `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for autosuggest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Candidate source could not be interpreted
    #[error("Candidate source error: {0}")]
    CandidateSource(String),

    /// Fragment pattern failed to compile
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
