//! Plans returned by the search engine.

use std::fmt;

use planforge_core::{Action, ActionId, Goal, PreconditionViolation, State};

use crate::error::PlanError;

/// An ordered sequence of actions borrowed from the domain.
///
/// # Example
///
/// ```
/// use planforge_core::{Action, BitSet, Goal, State};
/// use planforge_solver::Plan;
/// use planforge_core::ActionId;
///
/// let actions = vec![Action::new(
///     "switch_on",
///     BitSet::empty(1),
///     BitSet::from_indices(1, [0]),
///     BitSet::from_indices(1, [0]),
///     BitSet::empty(1),
/// )
/// .unwrap()];
///
/// let plan = Plan::new(&actions, vec![ActionId::new(0)]);
/// let states = plan.replay(&State::empty(1)).unwrap();
///
/// assert_eq!(plan.names(), vec!["switch_on"]);
/// assert_eq!(states.len(), 2);
/// assert!(plan
///     .validate(&State::empty(1), &Goal::positive_only(BitSet::from_indices(1, [0])))
///     .is_ok());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Plan<'a> {
    actions: &'a [Action],
    steps: Vec<ActionId>,
}

impl<'a> Plan<'a> {
    /// Creates a plan over `actions`.
    ///
    /// # Panics
    ///
    /// Panics if a step does not index into `actions`.
    pub fn new(actions: &'a [Action], steps: Vec<ActionId>) -> Self {
        assert!(
            steps.iter().all(|id| id.index() < actions.len()),
            "plan step out of range"
        );
        Self { actions, steps }
    }

    /// The empty plan.
    pub fn empty(actions: &'a [Action]) -> Self {
        Self {
            actions,
            steps: Vec::new(),
        }
    }

    /// Iterates the actions in execution order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'a Action> + '_ {
        let actions = self.actions;
        self.steps.iter().map(move |id| &actions[id.index()])
    }

    pub fn action_ids(&self) -> &[ActionId] {
        &self.steps
    }

    pub fn names(&self) -> Vec<&'a str> {
        self.iter().map(Action::name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Summed action cost.
    pub fn cost(&self) -> u64 {
        self.iter().map(|a| u64::from(a.cost())).sum()
    }

    /// Applies the plan step by step.
    ///
    /// Returns the initial state followed by the state after each step.
    pub fn replay(&self, initial: &State) -> Result<Vec<State>, PreconditionViolation> {
        let mut states = Vec::with_capacity(self.len() + 1);
        let mut current = initial.clone();
        for action in self.iter() {
            let next = action.apply(&current)?;
            states.push(std::mem::replace(&mut current, next));
        }
        states.push(current);
        Ok(states)
    }

    /// Checks that every step is applicable and the final state meets `goal`.
    pub fn validate(&self, initial: &State, goal: &Goal) -> Result<(), PlanError> {
        let mut state = initial.clone();
        for (step, action) in self.iter().enumerate() {
            state = action
                .successor(&state)
                .ok_or_else(|| PlanError::NotApplicable {
                    step,
                    action: action.name().to_string(),
                })?;
        }
        if goal.satisfied(&state) {
            Ok(())
        } else {
            Err(PlanError::GoalNotReached)
        }
    }
}

impl<'a, 'p> IntoIterator for &'p Plan<'a> {
    type Item = &'a Action;
    type IntoIter = Box<dyn ExactSizeIterator<Item = &'a Action> + 'p>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl fmt::Debug for Plan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl fmt::Display for Plan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, action) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            f.write_str(action.name())?;
        }
        Ok(())
    }
}
