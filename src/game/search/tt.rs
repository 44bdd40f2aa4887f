// src/game/search/tt.rs

//! Fixed-size transposition table.
//!
//! Entries live in a power-of-two array indexed by the low bits of the
//! Zobrist key. A slot holds exactly one entry and a store unconditionally
//! overwrites whatever was there; two positions that share a slot simply
//! evict each other. An entry is only ever trusted after its stored key has
//! been compared against the probing key, so index collisions cannot produce
//! false hits.

use shakmaty::Move;
pub use shakmaty::zobrist::Zobrist64;

use crate::constants::MATE_BOUND;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The stored score is exact: it fell strictly inside the search window.
    Exact,
    /// The stored score is a lower bound: the node failed high.
    Lower,
    /// The stored score is an upper bound: the node failed low.
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct TtEntry {
    pub key: Zobrist64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<Move>,
}

pub struct TranspositionTable {
    entries: Vec<Option<TtEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Default number of slots. At roughly 32 bytes per entry this is a
    /// table in the tens of megabytes.
    pub const DEFAULT_CAPACITY: usize = 1 << 20;

    /// Creates a table with `capacity` slots, rounded up to a power of two
    /// so that indexing is a mask of the key's low bits.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            entries: vec![None; capacity],
            mask: capacity - 1,
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    fn index(&self, key: &Zobrist64) -> usize {
        key.0 as usize & self.mask
    }

    /// Returns the entry for `key`, if the slot it maps to actually holds
    /// data for that key.
    pub fn probe(&self, key: &Zobrist64) -> Option<&TtEntry> {
        self.entries[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == *key)
    }

    /// Stores `entry`, overwriting whatever currently occupies its slot.
    pub fn store(&mut self, entry: TtEntry) {
        let index = self.index(&entry.key);
        self.entries[index] = Some(entry);
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|slot| *slot = None);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

/// Converts a score to its stored form. Mate scores carry the distance from
/// the root, which would be wrong when the entry is reused at a different
/// ply, so they are re-based to be relative to the node itself.
pub fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_BOUND {
        score + ply
    } else if score <= -MATE_BOUND {
        score - ply
    } else {
        score
    }
}

/// Inverse of [`score_to_tt`]: re-bases a stored mate score to the ply at
/// which the entry is being reused.
pub fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score >= MATE_BOUND {
        score - ply
    } else if score <= -MATE_BOUND {
        score + ply
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MATE_SCORE;

    fn entry(key: u64, depth: u8, score: i32) -> TtEntry {
        TtEntry {
            key: Zobrist64(key),
            depth,
            score,
            bound: Bound::Exact,
            best_move: None,
        }
    }

    #[test]
    fn test_store_then_probe_round_trips() {
        let mut tt = TranspositionTable::new(16);
        tt.store(entry(42, 7, 123));

        let found = tt.probe(&Zobrist64(42)).expect("entry should be present");
        assert_eq!(found.depth, 7);
        assert_eq!(found.score, 123);
        assert_eq!(found.bound, Bound::Exact);
    }

    #[test]
    fn test_probe_rejects_colliding_key() {
        // Both keys map to the same slot in a 16-entry table.
        let mut tt = TranspositionTable::new(16);
        tt.store(entry(5, 3, 50));

        assert!(tt.probe(&Zobrist64(5 + 16)).is_none());
        assert!(tt.probe(&Zobrist64(5)).is_some());
    }

    #[test]
    fn test_store_overwrites_colliding_slot() {
        let mut tt = TranspositionTable::new(16);
        tt.store(entry(5, 3, 50));
        tt.store(entry(5 + 16, 9, -20));

        // Last write wins; the earlier entry is gone.
        assert!(tt.probe(&Zobrist64(5)).is_none());
        let found = tt.probe(&Zobrist64(5 + 16)).unwrap();
        assert_eq!(found.score, -20);
        assert_eq!(found.depth, 9);
    }

    #[test]
    fn test_capacity_is_a_power_of_two() {
        assert_eq!(TranspositionTable::new(100).capacity(), 128);
        assert_eq!(TranspositionTable::new(128).capacity(), 128);
        assert_eq!(TranspositionTable::new(1).capacity(), 1);
    }

    #[test]
    fn test_mate_scores_rebase_through_the_table() {
        // A mate three plies below a node at ply 5 scores MATE - 8 from the
        // root. Stored, it becomes node-relative (MATE - 3); probed from
        // ply 2 the same entry must read as MATE - 5.
        let root_relative = MATE_SCORE - 8;
        let stored = score_to_tt(root_relative, 5);
        assert_eq!(stored, MATE_SCORE - 3);
        assert_eq!(score_from_tt(stored, 2), MATE_SCORE - 5);
        assert_eq!(score_from_tt(stored, 5), root_relative);

        // Mated-side scores mirror exactly.
        let mated = -(MATE_SCORE - 8);
        assert_eq!(score_to_tt(mated, 5), -(MATE_SCORE - 3));
        assert_eq!(score_from_tt(score_to_tt(mated, 5), 5), mated);

        // Ordinary centipawn scores pass through untouched.
        assert_eq!(score_to_tt(17, 5), 17);
        assert_eq!(score_from_tt(-250, 9), -250);
    }
}
