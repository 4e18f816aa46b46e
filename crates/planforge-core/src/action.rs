//! Actions: precondition and effect masks.

use std::fmt;

use crate::bits::BitSet;
use crate::error::{DomainError, PreconditionViolation, Result};
use crate::state::State;

/// Index of an action in its domain's declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(u32);

impl ActionId {
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    pub fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("action index exceeds u32::MAX"))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// A named state transition.
///
/// An action is applicable when every `pre_pos` proposition holds and no
/// `pre_neg` proposition does. Applying it clears `del` and then sets `add`.
///
/// Construction rejects actions whose `add` and `del` overlap, so the result
/// of [`apply`](Action::apply) never depends on the order of the two.
///
/// # Example
///
/// ```
/// use planforge_core::{Action, BitSet, State};
///
/// let drive = Action::new(
///     "drive_to_store",
///     BitSet::from_indices(4, [0, 1]),
///     BitSet::empty(4),
///     BitSet::from_indices(4, [2]),
///     BitSet::from_indices(4, [0]),
/// )
/// .unwrap();
///
/// let home = State::new(BitSet::from_indices(4, [0, 1]));
/// assert!(drive.is_applicable(&home));
/// assert_eq!(drive.apply(&home).unwrap(), State::new(BitSet::from_indices(4, [1, 2])));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    name: String,
    pre_pos: BitSet,
    pre_neg: BitSet,
    add: BitSet,
    del: BitSet,
    cost: u32,
}

impl Action {
    /// Creates an action with unit cost.
    ///
    /// # Errors
    ///
    /// - [`DomainError::WidthMismatch`] if the masks differ in width
    /// - [`DomainError::InvalidAction`] if `add` and `del` overlap
    /// - [`DomainError::ContradictoryPrecondition`] if `pre_pos` and
    ///   `pre_neg` overlap
    pub fn new(
        name: impl Into<String>,
        pre_pos: BitSet,
        pre_neg: BitSet,
        add: BitSet,
        del: BitSet,
    ) -> Result<Self> {
        let name = name.into();
        let expected = pre_pos.word_count();
        for mask in [&pre_neg, &add, &del] {
            if mask.word_count() != expected {
                return Err(DomainError::WidthMismatch {
                    expected,
                    found: mask.word_count(),
                });
            }
        }
        if add.intersects(&del) {
            return Err(DomainError::InvalidAction {
                overlapping: bit_labels(&add.intersection(&del)),
                action: name,
            });
        }
        if pre_pos.intersects(&pre_neg) {
            return Err(DomainError::ContradictoryPrecondition {
                overlapping: bit_labels(&pre_pos.intersection(&pre_neg)),
                action: name,
            });
        }
        Ok(Self {
            name,
            pre_pos,
            pre_neg,
            add,
            del,
            cost: 1,
        })
    }

    /// Sets the cost used by cost-aware search strategies.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pre_pos(&self) -> &BitSet {
        &self.pre_pos
    }

    pub fn pre_neg(&self) -> &BitSet {
        &self.pre_neg
    }

    pub fn add(&self) -> &BitSet {
        &self.add
    }

    pub fn del(&self) -> &BitSet {
        &self.del
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    #[inline]
    pub fn is_applicable(&self, state: &State) -> bool {
        state.is_superset_of(&self.pre_pos) && state.is_disjoint_from(&self.pre_neg)
    }

    /// Applies the action, refusing if its preconditions do not hold.
    pub fn apply(&self, state: &State) -> std::result::Result<State, PreconditionViolation> {
        if !self.is_applicable(state) {
            return Err(PreconditionViolation {
                action: self.name.clone(),
            });
        }
        Ok(state.apply(&self.add, &self.del))
    }

    /// Returns the successor state, or `None` when not applicable.
    #[inline]
    pub fn successor(&self, state: &State) -> Option<State> {
        self.is_applicable(state)
            .then(|| state.apply(&self.add, &self.del))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// Masks built outside a domain have no names to report; bit positions stand in.
fn bit_labels(bits: &BitSet) -> Vec<String> {
    bits.iter_ones().map(|i| format!("#{i}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(bits: &[usize]) -> BitSet {
        BitSet::from_indices(4, bits.iter().copied())
    }

    fn grab_keys() -> Action {
        Action::new("grab_keys", mask(&[0]), mask(&[]), mask(&[1]), mask(&[])).unwrap()
    }

    #[test]
    fn test_applicability() {
        let action = Action::new("a", mask(&[0]), mask(&[3]), mask(&[1]), mask(&[])).unwrap();
        assert!(action.is_applicable(&State::new(mask(&[0]))));
        assert!(!action.is_applicable(&State::new(mask(&[]))));
        assert!(!action.is_applicable(&State::new(mask(&[0, 3]))));
    }

    #[test]
    fn test_apply_checks_precondition() {
        let action = grab_keys();
        assert_eq!(
            action.apply(&State::new(mask(&[2]))),
            Err(PreconditionViolation {
                action: "grab_keys".into()
            })
        );
        assert_eq!(
            action.apply(&State::new(mask(&[0]))).unwrap(),
            State::new(mask(&[0, 1]))
        );
    }

    #[test]
    fn test_successor() {
        let action = grab_keys();
        assert!(action.successor(&State::new(mask(&[]))).is_none());
        assert_eq!(
            action.successor(&State::new(mask(&[0]))),
            Some(State::new(mask(&[0, 1])))
        );
    }

    #[test]
    fn test_overlapping_effects_rejected() {
        let err = Action::new("bad", mask(&[]), mask(&[]), mask(&[1, 2]), mask(&[2])).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidAction {
                action: "bad".into(),
                overlapping: vec!["#2".into()],
            }
        );
    }

    #[test]
    fn test_contradictory_precondition_rejected() {
        let err = Action::new("bad", mask(&[0]), mask(&[0]), mask(&[]), mask(&[])).unwrap_err();
        assert!(matches!(err, DomainError::ContradictoryPrecondition { .. }));
    }

    #[test]
    fn test_width_mismatch_rejected() {
        let err = Action::new(
            "wide",
            BitSet::empty(4),
            BitSet::empty(100),
            BitSet::empty(4),
            BitSet::empty(4),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::WidthMismatch {
                expected: 1,
                found: 2
            }
        );
    }

    #[test]
    fn test_default_cost_and_override() {
        assert_eq!(grab_keys().cost(), 1);
        assert_eq!(grab_keys().with_cost(5).cost(), 5);
    }

    #[test]
    fn test_action_id_bounds() {
        let last = ActionId::new(u32::MAX as usize);
        assert_eq!(last.index(), u32::MAX as usize);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    #[should_panic(expected = "action index exceeds u32::MAX")]
    fn test_action_id_overflow_panics() {
        ActionId::new(u32::MAX as usize + 1);
    }
}
