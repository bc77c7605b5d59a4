//! Linear question/answer quiz session.
//!
//! Questions are answered in order, with free navigation back over answered
//! ones. Each question is graded once; revisits re-display the stored record.
//! `finalize` closes the session into a terminal summary that only `restart`
//! exits.

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, FinalizeError, NavigationError, Result};
use crate::matching::answer_matches;
use crate::types::{AnsweredRecord, Grade, Question, QuizOptions};

/// Lifecycle phase of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    InProgress,
    Completed,
}

/// Direction for [`QuizSession::navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Previous,
    Next,
}

/// Result of submitting an answer for the current question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SubmitOutcome {
    /// Trimmed submission was empty; nothing recorded.
    EmptyAnswer,
    /// The current question already has a record; grading it again would
    /// double-count. The stored record is returned for re-display.
    AlreadyAnswered(AnsweredRecord),
    Graded {
        is_correct: bool,
        canonical_answer: String,
        is_last: bool,
    },
    /// The session was already finalized.
    SessionOver,
}

/// Aggregate result returned by [`QuizSession::finalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub score: u32,
    pub total: usize,
    pub percentage: u8,
    pub grade: Grade,
    pub records: Vec<AnsweredRecord>,
}

/// State machine for one run through an ordered question list.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    records: Vec<Option<AnsweredRecord>>,
    current_index: usize,
    score: u32,
    options: QuizOptions,
    phase: QuizPhase,
}

impl QuizSession {
    /// Create a session over `questions`, optionally shuffling the working
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::EmptyQuestionList` for an empty list.
    pub fn new(
        mut questions: Vec<Question>,
        options: QuizOptions,
        rng: &mut impl rand::Rng,
    ) -> Result<Self> {
        if questions.is_empty() {
            return Err(ContentError::EmptyQuestionList);
        }
        if options.shuffle {
            use rand::seq::SliceRandom;
            questions.shuffle(rng);
        }

        let total = questions.len();
        Ok(Self {
            questions,
            records: vec![None; total],
            current_index: 0,
            score: 0,
            options,
            phase: QuizPhase::InProgress,
        })
    }

    /// Grade a typed submission for the current question.
    ///
    /// Only the first submission for an index is graded and scored; later
    /// ones get the stored record back unchanged.
    pub fn submit(&mut self, raw: &str) -> SubmitOutcome {
        if self.phase == QuizPhase::Completed {
            return SubmitOutcome::SessionOver;
        }

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return SubmitOutcome::EmptyAnswer;
        }

        if let Some(record) = &self.records[self.current_index] {
            return SubmitOutcome::AlreadyAnswered(record.clone());
        }

        let question = &self.questions[self.current_index];
        let is_correct =
            answer_matches(trimmed, &question.accepted_answers, self.options.matching);

        self.records[self.current_index] = Some(AnsweredRecord {
            question_index: self.current_index,
            submitted_text: trimmed.to_string(),
            is_correct,
        });
        if is_correct {
            self.score += 1;
        }

        SubmitOutcome::Graded {
            is_correct,
            canonical_answer: question.canonical_answer.clone(),
            is_last: self.current_index + 1 == self.questions.len(),
        }
    }

    /// Move to the previous or next question and return it.
    ///
    /// # Errors
    ///
    /// `AtStart` / `AtEnd` at the list edges, `NotYetAnswered` when moving
    /// forward past an unanswered question, `SessionOver` once finalized.
    pub fn navigate(&mut self, direction: Direction) -> std::result::Result<&Question, NavigationError> {
        if self.phase == QuizPhase::Completed {
            return Err(NavigationError::SessionOver);
        }

        match direction {
            Direction::Previous => {
                if self.current_index == 0 {
                    return Err(NavigationError::AtStart);
                }
                self.current_index -= 1;
            }
            Direction::Next => {
                if self.current_index + 1 == self.questions.len() {
                    return Err(NavigationError::AtEnd);
                }
                if self.records[self.current_index].is_none() {
                    return Err(NavigationError::NotYetAnswered);
                }
                self.current_index += 1;
            }
        }

        Ok(&self.questions[self.current_index])
    }

    /// Close the session and produce the aggregate summary.
    ///
    /// # Errors
    ///
    /// `IncompleteQuiz` unless every question has a record;
    /// `AlreadyFinalized` on a completed session.
    pub fn finalize(&mut self) -> std::result::Result<QuizSummary, FinalizeError> {
        if self.phase == QuizPhase::Completed {
            return Err(FinalizeError::AlreadyFinalized);
        }

        let answered = self.answered_count();
        let total = self.questions.len();
        if answered < total {
            return Err(FinalizeError::IncompleteQuiz { answered, total });
        }

        self.phase = QuizPhase::Completed;

        let records: Vec<AnsweredRecord> =
            self.records.iter().flatten().cloned().collect();
        let percentage = (100.0 * f64::from(self.score) / total as f64).round() as u8;

        Ok(QuizSummary {
            score: self.score,
            total,
            percentage,
            grade: Grade::from_percentage(percentage),
            records,
        })
    }

    /// Discard all records and start over, re-shuffling if configured.
    ///
    /// # Errors
    ///
    /// Same content validation as [`QuizSession::new`].
    pub fn restart(&mut self, questions: Vec<Question>, rng: &mut impl rand::Rng) -> Result<()> {
        *self = Self::new(questions, self.options, rng)?;
        Ok(())
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// The question at `index` in the working order.
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// The stored record for a question, if it has been answered.
    pub fn record(&self, index: usize) -> Option<&AnsweredRecord> {
        self.records.get(index).and_then(Option::as_ref)
    }

    pub fn answered_count(&self) -> usize {
        self.records.iter().flatten().count()
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_completed(&self) -> bool {
        self.phase == QuizPhase::Completed
    }
}
