//! Shuffling helpers with injected randomness.
//!
//! Sessions never reach for a global RNG; every shuffle takes `&mut impl Rng`
//! so hosts can seed a `StdRng` for deterministic replays and tests.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::{CardSlot, Pair, Side};

/// Materialize one shuffled card pool covering every pair exactly once.
pub fn shuffled_slots(pairs: &[Pair], side: Side, rng: &mut impl Rng) -> Vec<CardSlot> {
    let mut slots: Vec<CardSlot> = pairs
        .iter()
        .map(|pair| CardSlot {
            pair_id: pair.id,
            side,
            text: match side {
                Side::Left => pair.left.clone(),
                Side::Right => pair.right.clone(),
            },
            matched: false,
        })
        .collect();
    slots.shuffle(rng);
    slots
}

/// Pick a random subset of `count` pairs from a larger catalog.
///
/// Returns the whole catalog (shuffled) when it has fewer than `count`
/// entries.
pub fn sample_pairs(catalog: &[Pair], count: usize, rng: &mut impl Rng) -> Vec<Pair> {
    let mut pairs = catalog.to_vec();
    pairs.shuffle(rng);
    pairs.truncate(count);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog(n: i64) -> Vec<Pair> {
        (0..n)
            .map(|i| Pair::new(i, format!("L{i}"), format!("R{i}")))
            .collect()
    }

    #[test]
    fn slots_cover_every_pair_once() {
        let pairs = catalog(6);
        let mut rng = StdRng::seed_from_u64(7);
        let slots = shuffled_slots(&pairs, Side::Left, &mut rng);

        assert_eq!(slots.len(), 6);
        let mut ids: Vec<i64> = slots.iter().map(|s| s.pair_id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert!(slots.iter().all(|s| s.side == Side::Left && !s.matched));
    }

    #[test]
    fn slot_text_follows_side() {
        let pairs = catalog(3);
        let mut rng = StdRng::seed_from_u64(1);
        let right = shuffled_slots(&pairs, Side::Right, &mut rng);
        assert!(right.iter().all(|s| s.text.starts_with('R')));
    }

    #[test]
    fn same_seed_reproduces_ordering() {
        let pairs = catalog(10);
        let a = shuffled_slots(&pairs, Side::Left, &mut StdRng::seed_from_u64(42));
        let b = shuffled_slots(&pairs, Side::Left, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn sample_returns_distinct_pairs() {
        let pairs = catalog(20);
        let mut rng = StdRng::seed_from_u64(3);
        let sampled = sample_pairs(&pairs, 5, &mut rng);

        assert_eq!(sampled.len(), 5);
        let mut ids: Vec<i64> = sampled.iter().map(|p| p.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn sample_caps_at_catalog_size() {
        let pairs = catalog(3);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample_pairs(&pairs, 10, &mut rng).len(), 3);
    }
}
