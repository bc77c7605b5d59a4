//! Core types shared by the pairing and quiz sessions.

use serde::{Deserialize, Serialize};

/// One prompt/answer association in a pairing-game catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub id: i64,
    pub left: String,
    pub right: String,
}

impl Pair {
    pub fn new(id: i64, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            id,
            left: left.into(),
            right: right.into(),
        }
    }
}

/// Which card pool a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The pool a selected card is matched against.
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// A rendered, selectable instance of one side of a pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSlot {
    pub pair_id: i64,
    pub side: Side,
    pub text: String,
    pub matched: bool,
}

/// What a second click on an already-selected slot does.
///
/// Source pages disagree: some replace the selection with the new card,
/// some deselect on re-click. Both are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReselectBehavior {
    Replace,
    Toggle,
}

impl Default for ReselectBehavior {
    fn default() -> Self {
        Self::Replace
    }
}

/// Configuration for a pairing-game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Deduct 2 points (floored at 0) on a mismatched pair.
    pub mismatch_penalty: bool,
    pub reselect: ReselectBehavior,
}

/// Comparison policy for typed quiz answers.
///
/// Picked per question set at configuration time: exact for bare-numeral
/// drills, case-insensitive for free-form vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::CaseInsensitive
    }
}

/// Configuration for a quiz session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOptions {
    /// Apply a uniform random permutation to the question order.
    pub shuffle: bool,
    pub matching: MatchingMode,
}

/// One quiz item. `accepted_answers` always contains `canonical_answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub canonical_answer: String,
    pub accepted_answers: Vec<String>,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        let answer = answer.into();
        Self {
            prompt: prompt.into(),
            accepted_answers: vec![answer.clone()],
            canonical_answer: answer,
        }
    }

    /// Add alternative accepted spellings.
    pub fn with_accepted(mut self, accepted: impl IntoIterator<Item = String>) -> Self {
        self.accepted_answers.extend(accepted);
        self
    }
}

/// The answer recorded for one question, kept for review on revisit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredRecord {
    pub question_index: usize,
    pub submitted_text: String,
    pub is_correct: bool,
}

/// Result tier derived from the final percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    Excellent,
    Good,
    NeedsPractice,
}

impl Grade {
    /// 80 and up is excellent, 60 and up good, below that needs practice.
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            Self::Excellent
        } else if percentage >= 60 {
            Self::Good
        } else {
            Self::NeedsPractice
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_accepts_canonical_answer() {
        let q = Question::new("2 × 2 = ?", "4");
        assert_eq!(q.accepted_answers, vec!["4"]);
        assert_eq!(q.canonical_answer, "4");
    }

    #[test]
    fn question_with_extra_accepted_answers() {
        let q = Question::new("lélegzik", "respire").with_accepted(["breathe".to_string()]);
        assert_eq!(q.accepted_answers.len(), 2);
        assert_eq!(q.canonical_answer, "respire");
    }

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }

    #[test]
    fn grade_tiers() {
        assert_eq!(Grade::from_percentage(80), Grade::Excellent);
        assert_eq!(Grade::from_percentage(60), Grade::Good);
        assert_eq!(Grade::from_percentage(59), Grade::NeedsPractice);
    }
}
