//! Candidate filtering against the active fragment.
//!
//! Matching is a full linear pass over the candidate set with a pluggable
//! predicate. The default predicate is a case-insensitive prefix match.

use regex::{Regex, RegexBuilder};

use crate::candidate::Candidate;
use crate::error::Result;

/// Compiled form of the active fragment handed to match predicates.
///
/// The fragment is matched literally, anchored at the start of the display
/// string, ignoring case.
#[derive(Debug, Clone)]
pub struct FragmentPattern {
    fragment: String,
    regex: Regex,
}

impl FragmentPattern {
    pub fn new(fragment: &str) -> Result<Self> {
        let regex = RegexBuilder::new(&format!("^{}", regex::escape(fragment)))
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            fragment: fragment.to_string(),
            regex,
        })
    }

    /// The raw fragment this pattern was compiled from.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The underlying anchored, case-insensitive regex.
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

/// Default predicate: the candidate's display string starts with the fragment,
/// ignoring case.
pub fn prefix_match(
    candidate: &Candidate,
    pattern: &FragmentPattern,
    display_key: Option<&str>,
) -> bool {
    pattern.is_match(&candidate.display(display_key))
}

/// Filter `candidates` with `predicate`, returning the indices of the matches
/// in their original order.
pub fn filter_candidates<F>(
    candidates: &[Candidate],
    pattern: &FragmentPattern,
    predicate: F,
) -> Vec<usize>
where
    F: Fn(&Candidate, &FragmentPattern) -> bool,
{
    candidates
        .iter()
        .enumerate()
        .filter(|(_, candidate)| predicate(candidate, pattern))
        .map(|(i, _)| i)
        .collect()
}

/// Compile `fragment` and filter `candidates` with `predicate`.
///
/// A fragment that cannot be compiled produces no matches.
pub fn match_fragment<F>(candidates: &[Candidate], fragment: &str, predicate: F) -> Vec<usize>
where
    F: Fn(&Candidate, &FragmentPattern) -> bool,
{
    match FragmentPattern::new(fragment) {
        Ok(pattern) => filter_candidates(candidates, &pattern, predicate),
        Err(e) => {
            tracing::warn!(error = %e, fragment_len = fragment.len(), "Fragment pattern rejected");
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::candidate::candidate_set;

    fn default_matches(candidates: &[Candidate], fragment: &str) -> Vec<usize> {
        match_fragment(candidates, fragment, |c, p| prefix_match(c, p, None))
    }

    #[test]
    fn prefix_is_case_insensitive() {
        let set = candidate_set(["New York", "newark", "Boston", "NEWCASTLE"]);
        assert_eq!(default_matches(&set, "new"), vec![0, 1, 3]);
        assert_eq!(default_matches(&set, "NEW Y"), vec![0]);
    }

    #[test]
    fn only_prefixes_match() {
        let set = candidate_set(["world", "hello world"]);
        assert_eq!(default_matches(&set, "wor"), vec![0]);
    }

    #[test]
    fn fragment_is_literal() {
        let set = candidate_set(["a.b", "axb", "(x)", "c++"]);
        assert_eq!(default_matches(&set, "a.b"), vec![0]);
        assert_eq!(default_matches(&set, "("), vec![2]);
        assert_eq!(default_matches(&set, "c+"), vec![3]);
    }

    #[test]
    fn preserves_candidate_order() {
        let set = candidate_set(["beta", "alpha", "bravo", "baker"]);
        assert_eq!(default_matches(&set, "b"), vec![0, 2, 3]);
    }

    #[test]
    fn custom_predicate() {
        let set = candidate_set(["New York", "York", "Yorkshire"]);
        let contains = |c: &Candidate, p: &FragmentPattern| {
            c.display(None)
                .to_lowercase()
                .contains(&p.fragment().to_lowercase())
        };
        assert_eq!(match_fragment(&set, "york", contains), vec![0, 1, 2]);
    }

    #[test]
    fn record_candidates_use_display_key() {
        let set: Vec<Candidate> =
            serde_json::from_str(r#"[{"name": "Lima"}, {"name": "Lisbon"}, {"code": "LI"}]"#)
                .unwrap();
        let matches = match_fragment(&set, "li", |c, p| prefix_match(c, p, Some("name")));
        assert_eq!(matches, vec![0, 1]);
    }

    #[test]
    fn prefix_property_holds() {
        let displays = ["Amsterdam", "amber", "AMS", "am", "a", "Zurich", ""];
        let set = candidate_set(displays);
        for fragment in ["a", "am", "AMS", "amb", "z", "zurich!"] {
            let got = default_matches(&set, fragment);
            let expected: Vec<usize> = displays
                .iter()
                .enumerate()
                .filter(|(_, s)| {
                    let head: String = s.chars().take(fragment.chars().count()).collect();
                    head.chars().count() == fragment.chars().count()
                        && head.to_lowercase() == fragment.to_lowercase()
                })
                .map(|(i, _)| i)
                .collect();
            assert_eq!(got, expected, "fragment {fragment:?}");
        }
    }
}
