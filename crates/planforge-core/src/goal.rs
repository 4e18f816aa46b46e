//! Goal conditions.

use crate::bits::BitSet;
use crate::state::State;

/// Acceptance condition: `pos` must all hold, `neg` must all not hold.
///
/// Overlapping masks are representable on purpose; such a goal is
/// unsatisfiable and the search engine reports it before searching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Goal {
    pos: BitSet,
    neg: BitSet,
}

impl Goal {
    pub fn new(pos: BitSet, neg: BitSet) -> Self {
        Self { pos, neg }
    }

    /// A goal with only required-true propositions.
    pub fn positive_only(pos: BitSet) -> Self {
        let width = pos.word_count() * 64;
        Self {
            pos,
            neg: BitSet::empty(width),
        }
    }

    pub fn positive(&self) -> &BitSet {
        &self.pos
    }

    pub fn negative(&self) -> &BitSet {
        &self.neg
    }

    /// True iff some proposition is required both true and false.
    pub fn is_contradictory(&self) -> bool {
        self.pos.intersects(&self.neg)
    }

    #[inline]
    pub fn satisfied(&self, state: &State) -> bool {
        state.is_superset_of(&self.pos) && state.is_disjoint_from(&self.neg)
    }

    /// Number of goal literals `state` gets wrong.
    pub fn unsatisfied_count(&self, state: &State) -> u32 {
        self.pos.difference(state.bits()).count_ones()
            + self.neg.intersection(state.bits()).count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfied() {
        let goal = Goal::new(BitSet::from_indices(4, [1]), BitSet::from_indices(4, [0]));
        assert!(goal.satisfied(&State::new(BitSet::from_indices(4, [1, 2]))));
        assert!(!goal.satisfied(&State::new(BitSet::from_indices(4, [0, 1]))));
        assert!(!goal.satisfied(&State::new(BitSet::from_indices(4, [2]))));
    }

    #[test]
    fn test_unsatisfied_count() {
        let goal = Goal::new(
            BitSet::from_indices(6, [1, 2, 3]),
            BitSet::from_indices(6, [0, 5]),
        );
        let state = State::new(BitSet::from_indices(6, [0, 1, 5]));
        assert_eq!(goal.unsatisfied_count(&state), 4);
    }

    #[test]
    fn test_contradictory() {
        let goal = Goal::new(BitSet::from_indices(3, [0, 1]), BitSet::from_indices(3, [1]));
        assert!(goal.is_contradictory());
        assert!(!Goal::positive_only(BitSet::from_indices(3, [0])).is_contradictory());
    }

    #[test]
    fn test_empty_goal_always_satisfied() {
        let goal = Goal::positive_only(BitSet::empty(3));
        assert!(goal.satisfied(&State::empty(3)));
    }
}
