//! Core session library for quiz and pairing-game drills.
//!
//! Provides:
//! - Two-pool pairing-game state machine (selection, match/mismatch, hints)
//! - Linear quiz state machine (submit, navigate, finalize)
//! - Answer matching for typed submissions
//! - Shuffling helpers with injected randomness
//!
//! Sessions are pure state machines: hosts construct them with a content
//! catalog and an RNG, forward user input as method calls, and re-render
//! from read-only projections. Nothing here does I/O or owns a clock.

pub mod error;
pub mod matching;
pub mod pairing;
pub mod quiz;
pub mod shuffle;
pub mod types;

pub use error::{ContentError, FinalizeError, NavigationError, Result};
pub use matching::answer_matches;
pub use pairing::{GamePhase, GameSummary, HintOutcome, PairingSession, SelectOutcome};
pub use quiz::{Direction, QuizPhase, QuizSession, QuizSummary, SubmitOutcome};
pub use shuffle::{sample_pairs, shuffled_slots};
pub use types::{
    AnsweredRecord, CardSlot, GameOptions, Grade, MatchingMode, Pair, Question, QuizOptions,
    ReselectBehavior, Side,
};
