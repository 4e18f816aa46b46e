//! Distance estimates for best-first search.
//!
//! An estimate of `None` marks a dead end: the goal cannot be reached from
//! the state even when delete effects are ignored.

use std::fmt::{self, Debug};

use planforge_config::HeuristicType;
use planforge_core::{Action, Goal, State};

/// Estimates the remaining cost from a state to the goal.
pub trait Heuristic: Send + Sync + Debug {
    fn estimate(&self, state: &State, goal: &Goal) -> Option<u64>;
}

/// Always zero. Best-first search with it is uniform-cost search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _state: &State, _goal: &Goal) -> Option<u64> {
        Some(0)
    }
}

/// Number of goal literals the state gets wrong.
///
/// Cheap but not admissible when one action fixes several literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoalCountHeuristic;

impl Heuristic for GoalCountHeuristic {
    fn estimate(&self, state: &State, goal: &Goal) -> Option<u64> {
        Some(u64::from(goal.unsatisfied_count(state)))
    }
}

#[derive(Debug, Clone)]
struct RelaxedAction {
    pre: Vec<usize>,
    add: Vec<usize>,
    cost: u64,
}

/// h_max over the delete relaxation.
///
/// Each proposition gets the cost of its cheapest relaxed derivation, where
/// an action costs its own cost plus the most expensive of its positive
/// preconditions. The estimate is the most expensive required-true goal
/// proposition. Negative preconditions and negative goals are ignored, which
/// keeps the estimate admissible.
#[derive(Debug, Clone)]
pub struct MaxCostHeuristic {
    actions: Vec<RelaxedAction>,
}

impl MaxCostHeuristic {
    pub fn new(actions: &[Action]) -> Self {
        Self {
            actions: actions
                .iter()
                .map(|a| RelaxedAction {
                    pre: a.pre_pos().iter_ones().collect(),
                    add: a.add().iter_ones().collect(),
                    cost: u64::from(a.cost()),
                })
                .collect(),
        }
    }
}

impl Heuristic for MaxCostHeuristic {
    fn estimate(&self, state: &State, goal: &Goal) -> Option<u64> {
        let width = state.bits().word_count() * 64;
        let mut cost: Vec<Option<u64>> = vec![None; width];
        for i in state.bits().iter_ones() {
            cost[i] = Some(0);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for action in &self.actions {
                let Some(pre) = max_cost(action.pre.iter().copied(), &cost) else {
                    continue;
                };
                let reached = pre + action.cost;
                for &p in &action.add {
                    if cost[p].map_or(true, |c| reached < c) {
                        cost[p] = Some(reached);
                        changed = true;
                    }
                }
            }
        }
        max_cost(goal.positive().iter_ones(), &cost)
    }
}

// Largest cost among `indices`, or `None` if any is unreached.
fn max_cost(indices: impl Iterator<Item = usize>, cost: &[Option<u64>]) -> Option<u64> {
    indices
        .map(|i| cost[i])
        .try_fold(0u64, |acc, c| c.map(|c| acc.max(c)))
}

/// Wraps a closure as a heuristic.
///
/// # Example
///
/// ```
/// use planforge_solver::heuristic::{FnHeuristic, Heuristic};
/// use planforge_core::{BitSet, Goal, State};
///
/// let h = FnHeuristic::new(|state: &State, _goal: &Goal| Some(u64::from(state.bits().count_ones())));
/// let state = State::new(BitSet::from_indices(4, [0, 2]));
/// assert_eq!(h.estimate(&state, &Goal::positive_only(BitSet::empty(4))), Some(2));
/// ```
pub struct FnHeuristic<F> {
    f: F,
}

impl<F> FnHeuristic<F>
where
    F: Fn(&State, &Goal) -> Option<u64> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> Debug for FnHeuristic<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHeuristic").finish_non_exhaustive()
    }
}

impl<F> Heuristic for FnHeuristic<F>
where
    F: Fn(&State, &Goal) -> Option<u64> + Send + Sync,
{
    fn estimate(&self, state: &State, goal: &Goal) -> Option<u64> {
        (self.f)(state, goal)
    }
}

/// Creates the built-in heuristic for a configured kind.
pub fn for_kind(kind: HeuristicType, actions: &[Action]) -> Box<dyn Heuristic> {
    match kind {
        HeuristicType::Zero => Box::new(ZeroHeuristic),
        HeuristicType::GoalCount => Box::new(GoalCountHeuristic),
        HeuristicType::MaxCost => Box::new(MaxCostHeuristic::new(actions)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planforge_core::BitSet;

    fn action(name: &str, pre: &[usize], add: &[usize], cost: u32) -> Action {
        Action::new(
            name,
            BitSet::from_indices(4, pre.iter().copied()),
            BitSet::empty(4),
            BitSet::from_indices(4, add.iter().copied()),
            BitSet::empty(4),
        )
        .unwrap()
        .with_cost(cost)
    }

    fn state(bits: &[usize]) -> State {
        State::new(BitSet::from_indices(4, bits.iter().copied()))
    }

    fn goal(bits: &[usize]) -> Goal {
        Goal::positive_only(BitSet::from_indices(4, bits.iter().copied()))
    }

    #[test]
    fn test_goal_count() {
        let g = Goal::new(BitSet::from_indices(4, [1, 2]), BitSet::from_indices(4, [0]));
        assert_eq!(GoalCountHeuristic.estimate(&state(&[0]), &g), Some(3));
        assert_eq!(GoalCountHeuristic.estimate(&state(&[1, 2]), &g), Some(0));
    }

    #[test]
    fn test_max_cost_chain() {
        let actions = vec![
            action("a", &[0], &[1], 2),
            action("b", &[1], &[2], 3),
            action("c", &[0], &[3], 1),
        ];
        let h = MaxCostHeuristic::new(&actions);
        assert_eq!(h.estimate(&state(&[0]), &goal(&[2])), Some(5));
        assert_eq!(h.estimate(&state(&[0]), &goal(&[2, 3])), Some(5));
        assert_eq!(h.estimate(&state(&[1]), &goal(&[2])), Some(3));
        assert_eq!(h.estimate(&state(&[2]), &goal(&[2])), Some(0));
    }

    #[test]
    fn test_max_cost_prefers_cheaper_derivation() {
        let actions = vec![action("slow", &[0], &[1], 10), action("fast", &[0], &[1], 1)];
        let h = MaxCostHeuristic::new(&actions);
        assert_eq!(h.estimate(&state(&[0]), &goal(&[1])), Some(1));
    }

    #[test]
    fn test_max_cost_dead_end() {
        let actions = vec![action("a", &[0], &[1], 1)];
        let h = MaxCostHeuristic::new(&actions);
        assert_eq!(h.estimate(&state(&[2]), &goal(&[1])), None);
    }

    #[test]
    fn test_for_kind() {
        let h = for_kind(HeuristicType::Zero, &[]);
        assert_eq!(h.estimate(&state(&[]), &goal(&[1])), Some(0));
        let h = for_kind(HeuristicType::GoalCount, &[]);
        assert_eq!(h.estimate(&state(&[]), &goal(&[1])), Some(1));
    }
}
