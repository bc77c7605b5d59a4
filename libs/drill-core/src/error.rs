//! Error types for drill-core.

use thiserror::Error;

/// Result type alias using ContentError.
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised when a session is constructed from a malformed catalog.
///
/// These indicate host misconfiguration, not user behavior, and are the only
/// hard failures in the crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("pair catalog is empty")]
    EmptyCatalog,

    #[error("duplicate pair id {id} in catalog")]
    DuplicatePairId { id: i64 },

    #[error("question list is empty")]
    EmptyQuestionList,
}

/// Navigation failures in a quiz session. All expected and recoverable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("already at the first question")]
    AtStart,

    #[error("already at the last question")]
    AtEnd,

    #[error("current question has not been answered yet")]
    NotYetAnswered,

    #[error("quiz has been finalized")]
    SessionOver,
}

/// Failures when finalizing a quiz session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeError {
    #[error("quiz incomplete: {answered} of {total} questions answered")]
    IncompleteQuiz { answered: usize, total: usize },

    #[error("quiz has already been finalized")]
    AlreadyFinalized,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_error_display() {
        let error = ContentError::DuplicatePairId { id: 3 };
        assert_eq!(error.to_string(), "duplicate pair id 3 in catalog");
    }

    #[test]
    fn finalize_error_display() {
        let error = FinalizeError::IncompleteQuiz {
            answered: 2,
            total: 5,
        };
        assert_eq!(
            error.to_string(),
            "quiz incomplete: 2 of 5 questions answered"
        );
    }
}
