//! Rolling record of overlapping pairs for recent steps
//!
//! Only the two steps before the current one are ever consulted, so the record
//! is a ring buffer of depth [`HISTORY_DEPTH`] rather than a per-step log.

use std::collections::HashSet;

/// Number of previous steps remembered
pub const HISTORY_DEPTH: usize = 2;

/// Unordered particle index pair, stored with the smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey(usize, usize);

impl PairKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn indices(self) -> (usize, usize) {
        (self.0, self.1)
    }
}

/// Overlap sets of the last [`HISTORY_DEPTH`] steps
#[derive(Debug, Clone, Default)]
pub struct CollisionHistory {
    slots: [HashSet<PairKey>; HISTORY_DEPTH],
    /// Slot holding the most recent step
    head: usize,
    /// Number of steps recorded so far, saturating at HISTORY_DEPTH
    filled: usize,
}

impl CollisionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Was `pair` overlapping during any remembered step?
    ///
    /// Before any step is recorded this is always false; after one step only
    /// that step is consulted.
    pub fn contains(&self, pair: PairKey) -> bool {
        (0..self.filled).any(|age| self.slot(age).contains(&pair))
    }

    /// Record the overlap set of the step that just finished, evicting the oldest.
    pub fn push(&mut self, overlaps: HashSet<PairKey>) {
        self.head = (self.head + 1) % HISTORY_DEPTH;
        self.slots[self.head] = overlaps;
        self.filled = (self.filled + 1).min(HISTORY_DEPTH);
    }

    /// Steps recorded so far, at most [`HISTORY_DEPTH`]
    pub fn len(&self) -> usize {
        self.filled
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Overlap set recorded `age` steps ago (0 = most recent)
    fn slot(&self, age: usize) -> &HashSet<PairKey> {
        &self.slots[(self.head + HISTORY_DEPTH - age) % HISTORY_DEPTH]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(usize, usize)]) -> HashSet<PairKey> {
        pairs.iter().map(|&(a, b)| PairKey::new(a, b)).collect()
    }

    #[test]
    fn pair_key_is_unordered() {
        assert_eq!(PairKey::new(3, 1), PairKey::new(1, 3));
        assert_eq!(PairKey::new(3, 1).indices(), (1, 3));
    }

    #[test]
    fn empty_history_contains_nothing() {
        let history = CollisionHistory::new();
        assert!(history.is_empty());
        assert!(!history.contains(PairKey::new(0, 1)));
    }

    #[test]
    fn remembers_two_steps_then_forgets() {
        let mut history = CollisionHistory::new();
        history.push(set(&[(0, 1)]));
        assert_eq!(history.len(), 1);
        assert!(history.contains(PairKey::new(1, 0)));

        history.push(set(&[(2, 3)]));
        assert_eq!(history.len(), 2);
        assert!(history.contains(PairKey::new(0, 1)));
        assert!(history.contains(PairKey::new(2, 3)));

        history.push(set(&[]));
        assert_eq!(history.len(), 2);
        assert!(!history.contains(PairKey::new(0, 1)));
        assert!(history.contains(PairKey::new(2, 3)));

        history.push(set(&[]));
        assert!(!history.contains(PairKey::new(2, 3)));
    }
}
