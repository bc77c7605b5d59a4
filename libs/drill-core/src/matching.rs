//! Answer comparison for typed quiz submissions.

use crate::types::MatchingMode;

/// Check a typed submission against every accepted answer for a question.
///
/// Surrounding whitespace is trimmed on both sides of the comparison. The
/// caller is expected to have rejected empty submissions already; an empty
/// trimmed submission never matches.
pub fn answer_matches(submitted: &str, accepted: &[String], mode: MatchingMode) -> bool {
    let submitted = submitted.trim();
    if submitted.is_empty() {
        return false;
    }

    accepted
        .iter()
        .any(|answer| compare(submitted, answer.trim(), mode))
}

fn compare(submitted: &str, answer: &str, mode: MatchingMode) -> bool {
    match mode {
        MatchingMode::Exact => submitted == answer,
        MatchingMode::CaseInsensitive => submitted.to_lowercase() == answer.to_lowercase(),
    }
}
