//! Candidate model.
//!
//! A candidate is either a plain string or a structured record whose display
//! string lives under a configured field. The engine never mutates
//! candidates; the set is shared read-only with the caller.

use std::borrow::Cow;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// One suggestible entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Candidate {
    /// Used directly as its own display string.
    Text(String),
    /// Structured record; the display string is read from a configured field.
    Record(Map<String, Value>),
}

impl Candidate {
    /// Extract the display string for this candidate.
    ///
    /// Records without a display key, or lacking the configured field, yield
    /// an empty string rather than failing.
    pub fn display(&self, display_key: Option<&str>) -> Cow<'_, str> {
        match (self, display_key) {
            (Self::Text(text), _) => Cow::Borrowed(text.as_str()),
            (Self::Record(fields), Some(key)) => match fields.get(key) {
                Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
                Some(Value::Null) | None => Cow::Borrowed(""),
                Some(other) => Cow::Owned(other.to_string()),
            },
            (Self::Record(_), None) => Cow::Borrowed(""),
        }
    }
}

impl From<&str> for Candidate {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Candidate {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Map<String, Value>> for Candidate {
    fn from(fields: Map<String, Value>) -> Self {
        Self::Record(fields)
    }
}

/// The ordered candidate collection, shared read-only with the caller.
pub type CandidateSet = Arc<[Candidate]>;

/// Build a [`CandidateSet`] from anything convertible into candidates.
pub fn candidate_set<I, T>(items: I) -> CandidateSet
where
    I: IntoIterator<Item = T>,
    T: Into<Candidate>,
{
    items.into_iter().map(Into::into).collect()
}

/// Parse candidates from a JSON array of strings and/or objects.
pub fn parse_json_candidates(content: &str) -> Result<CandidateSet> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(Error::CandidateSource(
            "expected a JSON array of strings or objects".to_string(),
        ));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(Candidate::Text(s)),
            Value::Object(fields) => Ok(Candidate::Record(fields)),
            other => Err(Error::CandidateSource(format!(
                "entry {i} is neither a string nor an object: {other}"
            ))),
        })
        .collect()
}

/// Parse candidates from plain text, one per non-empty line.
pub fn parse_line_candidates(content: &str) -> CandidateSet {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(Candidate::from)
        .collect()
}

/// Load candidates from a file: `.json` files hold an array, anything else is
/// read line by line.
pub fn load_candidates(path: &Path) -> Result<CandidateSet> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::CandidateSource(format!("Failed to read {}: {}", path.display(), e))
    })?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let set = if is_json {
        parse_json_candidates(&content)?
    } else {
        parse_line_candidates(&content)
    };
    tracing::debug!(path = %path.display(), count = set.len(), "Loaded candidates");
    Ok(set)
}
