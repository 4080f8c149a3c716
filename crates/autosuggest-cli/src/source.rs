//! Candidate source resolution.

use std::path::Path;

use autosuggest_core::candidate::{self, CandidateSet};

/// Candidates used when no source file is given.
pub const DEMO_CITIES: &[&str] = &[
    "Amsterdam",
    "Athens",
    "Barcelona",
    "Berlin",
    "Boston",
    "Brussels",
    "Budapest",
    "Buenos Aires",
    "Chicago",
    "Copenhagen",
    "Dublin",
    "Helsinki",
    "Lisbon",
    "London",
    "Los Angeles",
    "Madrid",
    "Milan",
    "Montreal",
    "Nairobi",
    "New Delhi",
    "New Orleans",
    "New York",
    "Newark",
    "Nice",
    "Oslo",
    "Paris",
    "Prague",
    "Rome",
    "San Francisco",
    "Stockholm",
    "Tokyo",
    "Toronto",
    "Vienna",
    "Warsaw",
    "Zurich",
];

/// Load candidates from `path`, or fall back to the demo list.
pub fn resolve_candidates(path: Option<&Path>) -> autosuggest_core::Result<CandidateSet> {
    match path {
        Some(path) => candidate::load_candidates(path),
        None => Ok(candidate::candidate_set(DEMO_CITIES.iter().copied())),
    }
}
