//! Two-pool pairing-game session.
//!
//! The session is a pure state machine: the host forwards card clicks into
//! [`PairingSession::select`], re-renders from the read-only projections, and
//! owns every timer. A failed match parks the session in
//! [`GamePhase::MismatchPending`] until the host calls
//! [`PairingSession::clear_mismatch`] after its own display delay; a new
//! selection arriving first cancels the stale pair itself.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ContentError, Result};
use crate::shuffle::shuffled_slots;
use crate::types::{CardSlot, GameOptions, Pair, ReselectBehavior, Side};

const MATCH_POINTS: u32 = 10;
const MISMATCH_PENALTY: u32 = 2;
const HINT_PENALTY: u32 = 1;

/// Lifecycle phase of a pairing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    InProgress,
    /// A mismatched pair is still highlighted; cleared by `clear_mismatch`
    /// or by the next selection.
    MismatchPending,
    /// Terminal until `reset`.
    Completed,
}

/// Result of forwarding one card click into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SelectOutcome {
    /// Click on a matched slot, an out-of-range index, or a completed
    /// session. No state change.
    Ignored,
    Selected {
        side: Side,
        slot: usize,
    },
    /// Toggle mode only: re-clicking the selected slot cleared it.
    Deselected {
        side: Side,
        slot: usize,
    },
    Matched {
        pair_id: i64,
        completed: bool,
    },
    Mismatched {
        penalty_applied: bool,
    },
}

/// Result of asking for a hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum HintOutcome {
    /// The counterpart of the selected card. Costs one point.
    Revealed { side: Side, slot: usize },
    /// Hints need exactly one selected card.
    NoSelection,
    /// The session is already complete.
    Unavailable,
}

/// Immutable snapshot captured when the last pair is matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub elapsed_seconds: i64,
}

/// State machine for one play-through of the pairing game.
#[derive(Debug, Clone)]
pub struct PairingSession {
    pairs: Vec<Pair>,
    left: Vec<CardSlot>,
    right: Vec<CardSlot>,
    selected_left: Option<usize>,
    selected_right: Option<usize>,
    score: u32,
    matched_count: usize,
    phase: GamePhase,
    options: GameOptions,
    started_at: DateTime<Utc>,
    summary: Option<GameSummary>,
}

impl PairingSession {
    /// Create a session over `pairs` with two independently shuffled pools.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::EmptyCatalog` for an empty catalog and
    /// `ContentError::DuplicatePairId` when two pairs share an id.
    pub fn new(
        pairs: Vec<Pair>,
        options: GameOptions,
        rng: &mut impl rand::Rng,
        started_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_pairs(&pairs)?;

        let left = shuffled_slots(&pairs, Side::Left, rng);
        let right = shuffled_slots(&pairs, Side::Right, rng);

        Ok(Self {
            pairs,
            left,
            right,
            selected_left: None,
            selected_right: None,
            score: 0,
            matched_count: 0,
            phase: GamePhase::InProgress,
            options,
            started_at,
            summary: None,
        })
    }

    /// Forward a card click. When this completes a left/right pair the match
    /// is evaluated immediately.
    pub fn select(&mut self, side: Side, slot: usize, now: DateTime<Utc>) -> SelectOutcome {
        if self.phase == GamePhase::Completed {
            return SelectOutcome::Ignored;
        }

        let pool = self.slots(side);
        match pool.get(slot) {
            Some(card) if !card.matched => {}
            _ => return SelectOutcome::Ignored,
        }

        // A selection arriving before the host's mismatch delay fired cancels
        // the stale pair.
        self.clear_mismatch();

        if self.selected(side) == Some(slot) {
            if self.options.reselect == ReselectBehavior::Toggle {
                *self.selected_mut(side) = None;
                return SelectOutcome::Deselected { side, slot };
            }
            return SelectOutcome::Selected { side, slot };
        }

        *self.selected_mut(side) = Some(slot);

        match (self.selected_left, self.selected_right) {
            (Some(left), Some(right)) => self.evaluate_pair(left, right, now),
            _ => SelectOutcome::Selected { side, slot },
        }
    }

    /// Clear a pending mismatched pair. No-op in any other phase; hosts call
    /// this from a cancellable delayed callback and must tolerate the
    /// selection having moved on.
    pub fn clear_mismatch(&mut self) {
        if self.phase == GamePhase::MismatchPending {
            self.selected_left = None;
            self.selected_right = None;
            self.phase = GamePhase::InProgress;
        }
    }

    /// Reveal the counterpart of the single selected card, for one point.
    pub fn use_hint(&mut self) -> HintOutcome {
        if self.phase == GamePhase::Completed {
            return HintOutcome::Unavailable;
        }

        let (selected_side, selected_slot) = match (self.selected_left, self.selected_right) {
            (Some(slot), None) => (Side::Left, slot),
            (None, Some(slot)) => (Side::Right, slot),
            _ => return HintOutcome::NoSelection,
        };

        let pair_id = self.slots(selected_side)[selected_slot].pair_id;
        let other = selected_side.opposite();
        let counterpart = self
            .slots(other)
            .iter()
            .position(|card| card.pair_id == pair_id && !card.matched);

        match counterpart {
            Some(slot) => {
                self.score = self.score.saturating_sub(HINT_PENALTY);
                HintOutcome::Revealed { side: other, slot }
            }
            None => HintOutcome::NoSelection,
        }
    }

    /// Return to the initial state with a fresh shuffle over `pairs`.
    ///
    /// # Errors
    ///
    /// Same content validation as [`PairingSession::new`].
    pub fn reset(
        &mut self,
        pairs: Vec<Pair>,
        rng: &mut impl rand::Rng,
        started_at: DateTime<Utc>,
    ) -> Result<()> {
        *self = Self::new(pairs, self.options, rng, started_at)?;
        Ok(())
    }

    pub fn slots(&self, side: Side) -> &[CardSlot] {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn selected(&self, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.selected_left,
            Side::Right => self.selected_right,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn matched_count(&self) -> usize {
        self.matched_count
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs_left(&self) -> usize {
        self.pairs.len() - self.matched_count
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Wall-clock seconds since the session started; frozen once complete.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        match &self.summary {
            Some(summary) => summary.elapsed_seconds,
            None => (now - self.started_at).num_seconds(),
        }
    }

    /// The completion snapshot, present only in the `Completed` phase.
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    fn selected_mut(&mut self, side: Side) -> &mut Option<usize> {
        match side {
            Side::Left => &mut self.selected_left,
            Side::Right => &mut self.selected_right,
        }
    }

    fn evaluate_pair(&mut self, left: usize, right: usize, now: DateTime<Utc>) -> SelectOutcome {
        let pair_id = self.left[left].pair_id;
        if pair_id != self.right[right].pair_id {
            if self.options.mismatch_penalty {
                self.score = self.score.saturating_sub(MISMATCH_PENALTY);
            }
            self.phase = GamePhase::MismatchPending;
            return SelectOutcome::Mismatched {
                penalty_applied: self.options.mismatch_penalty,
            };
        }

        self.left[left].matched = true;
        self.right[right].matched = true;
        self.selected_left = None;
        self.selected_right = None;
        self.score += MATCH_POINTS;
        self.matched_count += 1;

        let completed = self.matched_count == self.pairs.len();
        if completed {
            self.phase = GamePhase::Completed;
            self.summary = Some(GameSummary {
                score: self.score,
                started_at: self.started_at,
                completed_at: now,
                elapsed_seconds: (now - self.started_at).num_seconds(),
            });
        }

        SelectOutcome::Matched { pair_id, completed }
    }
}

fn validate_pairs(pairs: &[Pair]) -> Result<()> {
    if pairs.is_empty() {
        return Err(ContentError::EmptyCatalog);
    }
    let mut seen = HashSet::new();
    for pair in pairs {
        if !seen.insert(pair.id) {
            return Err(ContentError::DuplicatePairId { id: pair.id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn catalog() -> Vec<Pair> {
        vec![
            Pair::new(0, "A", "a"),
            Pair::new(1, "B", "b"),
            Pair::new(2, "C", "c"),
            Pair::new(3, "D", "d"),
        ]
    }

    fn session(options: GameOptions) -> PairingSession {
        let mut rng = StdRng::seed_from_u64(11);
        PairingSession::new(catalog(), options, &mut rng, now()).unwrap()
    }

    /// Shuffled position of a pair's card in one pool.
    fn slot_of(session: &PairingSession, side: Side, pair_id: i64) -> usize {
        session
            .slots(side)
            .iter()
            .position(|card| card.pair_id == pair_id)
            .unwrap()
    }

    fn select_pair(session: &mut PairingSession, left_id: i64, right_id: i64) -> SelectOutcome {
        let left = slot_of(session, Side::Left, left_id);
        session.select(Side::Left, left, now());
        let right = slot_of(session, Side::Right, right_id);
        session.select(Side::Right, right, now())
    }

    #[test]
    fn rejects_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = PairingSession::new(vec![], GameOptions::default(), &mut rng, now());
        assert_eq!(result.unwrap_err(), ContentError::EmptyCatalog);
    }

    #[test]
    fn rejects_duplicate_pair_ids() {
        let mut rng = StdRng::seed_from_u64(0);
        let pairs = vec![Pair::new(1, "A", "a"), Pair::new(1, "B", "b")];
        let result = PairingSession::new(pairs, GameOptions::default(), &mut rng, now());
        assert_eq!(result.unwrap_err(), ContentError::DuplicatePairId { id: 1 });
    }

    #[test]
    fn fresh_session_has_full_pools() {
        let session = session(GameOptions::default());
        assert_eq!(session.slots(Side::Left).len(), 4);
        assert_eq!(session.slots(Side::Right).len(), 4);
        assert_eq!(session.matched_count(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), GamePhase::InProgress);
    }

    #[test]
    fn matching_pair_scores_ten() {
        let mut session = session(GameOptions::default());
        let outcome = select_pair(&mut session, 0, 0);

        assert_eq!(
            outcome,
            SelectOutcome::Matched {
                pair_id: 0,
                completed: false
            }
        );
        assert_eq!(session.score(), 10);
        assert_eq!(session.matched_count(), 1);
        assert_eq!(session.selected(Side::Left), None);
        assert_eq!(session.selected(Side::Right), None);
    }

    #[test]
    fn mismatch_without_penalty_keeps_score() {
        let mut session = session(GameOptions::default());
        select_pair(&mut session, 0, 0);
        let outcome = select_pair(&mut session, 1, 2);

        assert_eq!(
            outcome,
            SelectOutcome::Mismatched {
                penalty_applied: false
            }
        );
        assert_eq!(session.score(), 10);
        assert_eq!(session.matched_count(), 1);
        assert_eq!(session.phase(), GamePhase::MismatchPending);
    }

    #[test]
    fn mismatch_penalty_deducts_two() {
        let mut session = session(GameOptions {
            mismatch_penalty: true,
            ..GameOptions::default()
        });
        select_pair(&mut session, 0, 0);
        select_pair(&mut session, 1, 2);
        assert_eq!(session.score(), 8);
    }

    #[test]
    fn penalty_floors_score_at_zero() {
        let mut session = session(GameOptions {
            mismatch_penalty: true,
            ..GameOptions::default()
        });
        select_pair(&mut session, 1, 2);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn clear_mismatch_resumes_play() {
        let mut session = session(GameOptions::default());
        select_pair(&mut session, 1, 2);

        session.clear_mismatch();
        assert_eq!(session.phase(), GamePhase::InProgress);
        assert_eq!(session.selected(Side::Left), None);
        assert_eq!(session.selected(Side::Right), None);

        // Idempotent outside the pending phase.
        session.clear_mismatch();
        assert_eq!(session.phase(), GamePhase::InProgress);
    }

    #[test]
    fn selection_during_pending_mismatch_cancels_stale_pair() {
        let mut session = session(GameOptions::default());
        select_pair(&mut session, 1, 2);
        assert_eq!(session.phase(), GamePhase::MismatchPending);

        let left = slot_of(&session, Side::Left, 3);
        let outcome = session.select(Side::Left, left, now());

        assert_eq!(
            outcome,
            SelectOutcome::Selected {
                side: Side::Left,
                slot: left
            }
        );
        assert_eq!(session.phase(), GamePhase::InProgress);
        assert_eq!(session.selected(Side::Left), Some(left));
        assert_eq!(session.selected(Side::Right), None);
    }

    #[test]
    fn matched_slot_clicks_are_ignored() {
        let mut session = session(GameOptions::default());
        let left = slot_of(&session, Side::Left, 0);
        select_pair(&mut session, 0, 0);

        assert_eq!(session.select(Side::Left, left, now()), SelectOutcome::Ignored);
    }

    #[test]
    fn out_of_range_slot_is_ignored() {
        let mut session = session(GameOptions::default());
        assert_eq!(session.select(Side::Left, 99, now()), SelectOutcome::Ignored);
    }

    #[test]
    fn replace_mode_keeps_same_slot_selected() {
        let mut session = session(GameOptions::default());
        let left = slot_of(&session, Side::Left, 0);

        session.select(Side::Left, left, now());
        let outcome = session.select(Side::Left, left, now());

        assert_eq!(
            outcome,
            SelectOutcome::Selected {
                side: Side::Left,
                slot: left
            }
        );
        assert_eq!(session.selected(Side::Left), Some(left));
    }

    #[test]
    fn replace_mode_switches_to_newer_slot() {
        let mut session = session(GameOptions::default());
        let first = slot_of(&session, Side::Left, 0);
        let second = slot_of(&session, Side::Left, 1);

        session.select(Side::Left, first, now());
        session.select(Side::Left, second, now());

        assert_eq!(session.selected(Side::Left), Some(second));
    }

    #[test]
    fn toggle_mode_deselects_on_reclick() {
        let mut session = session(GameOptions {
            reselect: ReselectBehavior::Toggle,
            ..GameOptions::default()
        });
        let left = slot_of(&session, Side::Left, 0);

        session.select(Side::Left, left, now());
        let outcome = session.select(Side::Left, left, now());

        assert_eq!(
            outcome,
            SelectOutcome::Deselected {
                side: Side::Left,
                slot: left
            }
        );
        assert_eq!(session.selected(Side::Left), None);
    }

    #[test]
    fn completing_all_pairs_captures_summary() {
        let mut session = session(GameOptions::default());
        let started = session.started_at();

        for id in 0..3 {
            select_pair(&mut session, id, id);
        }
        let left = slot_of(&session, Side::Left, 3);
        session.select(Side::Left, left, now());
        let right = slot_of(&session, Side::Right, 3);
        let finished_at = started + Duration::seconds(83);
        let outcome = session.select(Side::Right, right, finished_at);

        assert_eq!(
            outcome,
            SelectOutcome::Matched {
                pair_id: 3,
                completed: true
            }
        );
        assert_eq!(session.phase(), GamePhase::Completed);

        let summary = session.summary().unwrap();
        assert_eq!(summary.score, 40);
        assert_eq!(summary.elapsed_seconds, 83);
        assert_eq!(session.elapsed_seconds(finished_at + Duration::seconds(60)), 83);

        // Terminal: further clicks are ignored.
        assert_eq!(session.select(Side::Left, 0, now()), SelectOutcome::Ignored);
    }

    #[test]
    fn hint_reveals_counterpart_for_a_point() {
        let mut session = session(GameOptions::default());
        select_pair(&mut session, 0, 0);

        let left = slot_of(&session, Side::Left, 2);
        session.select(Side::Left, left, now());
        let outcome = session.use_hint();

        let expected = slot_of(&session, Side::Right, 2);
        assert_eq!(
            outcome,
            HintOutcome::Revealed {
                side: Side::Right,
                slot: expected
            }
        );
        assert_eq!(session.score(), 9);
    }

    #[test]
    fn hint_needs_exactly_one_selection() {
        let mut session = session(GameOptions::default());
        assert_eq!(session.use_hint(), HintOutcome::NoSelection);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut session = session(GameOptions::default());
        select_pair(&mut session, 0, 0);
        select_pair(&mut session, 1, 1);

        let mut rng = StdRng::seed_from_u64(5);
        session.reset(catalog(), &mut rng, now()).unwrap();

        assert_eq!(session.score(), 0);
        assert_eq!(session.matched_count(), 0);
        assert_eq!(session.phase(), GamePhase::InProgress);
        assert!(session.summary().is_none());
    }

    #[test]
    fn reset_with_same_seed_reproduces_ordering() {
        let mut first = session(GameOptions::default());
        let mut second = session(GameOptions::default());

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        first.reset(catalog(), &mut rng_a, now()).unwrap();
        second.reset(catalog(), &mut rng_b, now()).unwrap();

        assert_eq!(first.slots(Side::Left), second.slots(Side::Left));
        assert_eq!(first.slots(Side::Right), second.slots(Side::Right));
    }
}
