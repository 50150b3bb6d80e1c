//! Incremental repetition counting.
//!
//! Keeps a running map from position key to occurrence count so that
//! "has this position occurred N times" is answered in O(1) instead of
//! rescanning the whole move history. The map is cleared whenever an
//! irreversible move is played, since positions from before such a move
//! can never occur again.

use std::collections::HashMap;

use shakmaty::zobrist::Zobrist64;

/// Occurrence counter over position keys.
///
/// The key is the 64-bit Zobrist hash of a position with en passant
/// folded in only when a legal en passant capture exists, so two
/// positions compare equal exactly when they are repetitions for draw
/// purposes.
#[derive(Debug, Clone, Default)]
pub struct Transpositions {
    counts: HashMap<Zobrist64, u32>,
}

impl Transpositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of `key`.
    pub fn count(&mut self, key: Zobrist64) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Removes one occurrence of `key`. Never goes below zero: counts
    /// dropped by an irreversible move's clear stay dropped, and a later
    /// retract past that move must not underflow.
    pub fn uncount(&mut self, key: Zobrist64) {
        if let Some(n) = self.counts.get_mut(&key) {
            *n = n.saturating_sub(1);
            if *n == 0 {
                self.counts.remove(&key);
            }
        }
    }

    /// Forgets all occurrences. Called when an irreversible move makes
    /// every previously seen position unreachable.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// How often `key` has occurred; missing entries read as zero.
    pub fn occurrences(&self, key: Zobrist64) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Number of distinct keys currently tracked.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_key() {
        let mut t = Transpositions::new();
        let a = Zobrist64(1);
        let b = Zobrist64(2);

        t.count(a);
        t.count(a);
        t.count(b);

        assert_eq!(t.occurrences(a), 2);
        assert_eq!(t.occurrences(b), 1);
        assert_eq!(t.occurrences(Zobrist64(3)), 0);
    }

    #[test]
    fn uncount_saturates_at_zero() {
        let mut t = Transpositions::new();
        let a = Zobrist64(7);

        t.uncount(a);
        assert_eq!(t.occurrences(a), 0);

        t.count(a);
        t.uncount(a);
        t.uncount(a);
        assert_eq!(t.occurrences(a), 0);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut t = Transpositions::new();
        t.count(Zobrist64(1));
        t.count(Zobrist64(2));

        t.clear();

        assert!(t.is_empty());
        assert_eq!(t.occurrences(Zobrist64(1)), 0);
    }
}
