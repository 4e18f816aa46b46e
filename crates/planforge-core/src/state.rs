//! World states.

use crate::bits::BitSet;
use crate::proposition::PropositionId;

/// Which propositions currently hold.
///
/// States are immutable values. A successor is produced by [`State::apply`],
/// never by mutating an existing state, and two states are equal iff their
/// bit patterns are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    bits: BitSet,
}

impl State {
    pub fn new(bits: BitSet) -> Self {
        Self { bits }
    }

    /// The state in which nothing holds.
    pub fn empty(width: usize) -> Self {
        Self::new(BitSet::empty(width))
    }

    /// A closed-world state: the listed propositions hold, all others do not.
    pub fn from_true(width: usize, ids: impl IntoIterator<Item = PropositionId>) -> Self {
        Self::new(BitSet::from_indices(width, ids.into_iter().map(|id| id.index())))
    }

    #[inline]
    pub fn bits(&self) -> &BitSet {
        &self.bits
    }

    #[inline]
    pub fn holds(&self, id: PropositionId) -> bool {
        self.bits.contains(id.index())
    }

    /// True iff every proposition in `mask` holds.
    #[inline]
    pub fn is_superset_of(&self, mask: &BitSet) -> bool {
        self.bits.is_superset_of(mask)
    }

    /// True iff no proposition in `mask` holds.
    #[inline]
    pub fn is_disjoint_from(&self, mask: &BitSet) -> bool {
        self.bits.is_disjoint_from(mask)
    }

    /// Returns `(self & !del) | add`.
    #[inline]
    pub fn apply(&self, add: &BitSet, del: &BitSet) -> State {
        State::new(self.bits.apply(add, del))
    }

    /// Iterates the propositions that hold, in index order.
    pub fn true_propositions(&self) -> impl Iterator<Item = PropositionId> + '_ {
        self.bits.iter_ones().map(PropositionId::new)
    }
}

impl From<BitSet> for State {
    fn from(bits: BitSet) -> Self {
        Self::new(bits)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(indices: &[usize]) -> Vec<PropositionId> {
        indices.iter().map(|&i| PropositionId::new(i)).collect()
    }

    #[test]
    fn test_from_true_is_closed_world() {
        let state = State::from_true(4, ids(&[0, 2]));
        assert!(state.holds(PropositionId::new(0)));
        assert!(!state.holds(PropositionId::new(1)));
        assert!(state.holds(PropositionId::new(2)));
        assert!(!state.holds(PropositionId::new(3)));
    }

    #[test]
    fn test_apply_returns_new_state() {
        let state = State::from_true(4, ids(&[0]));
        let add = BitSet::from_indices(4, [1]);
        let del = BitSet::from_indices(4, [0]);
        let next = state.apply(&add, &del);

        assert_eq!(next, State::from_true(4, ids(&[1])));
        assert_eq!(state, State::from_true(4, ids(&[0])));
    }

    #[test]
    fn test_equal_states_hash_equal() {
        let a = State::from_true(90, ids(&[3, 80]));
        let b = State::from_true(90, ids(&[80, 3]));
        let mut seen = HashSet::new();
        seen.insert(a);
        assert!(!seen.insert(b));
    }

    #[test]
    fn test_true_propositions() {
        let state = State::from_true(10, ids(&[7, 1]));
        assert_eq!(state.true_propositions().collect::<Vec<_>>(), ids(&[1, 7]));
    }
}
