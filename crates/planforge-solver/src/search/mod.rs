//! Forward state-space search strategies.
//!
//! # Strategies
//!
//! - **Breadth First**: FIFO frontier, goal test at generation. Shortest
//!   plans by action count.
//! - **Best First**: priority `g + h`, goal test at pop, states reopened
//!   when reached more cheaply. Minimum-cost plans with an admissible
//!   heuristic.
//! - **Greedy Best First**: priority `h`, first reach wins.
//!
//! All strategies visit actions in declaration order and break ties by
//! insertion order, so a fixed input always yields the same plan.

mod best_first;
mod breadth_first;
mod parallel;

use planforge_core::{Action, ActionId, Goal, State};

use crate::error::{BudgetKind, Result, SolveError};
use crate::scope::SearchScope;
use crate::termination::Termination;

pub(crate) use best_first::{best_first, PriorityMode};
pub(crate) use breadth_first::breadth_first;
pub(crate) use parallel::parallel_breadth_first;

/// Read-only inputs shared by every strategy.
pub(crate) struct SearchContext<'a> {
    pub actions: &'a [Action],
    pub goal: &'a Goal,
    pub depth_limit: Option<usize>,
    pub termination: &'a dyn Termination,
}

impl SearchContext<'_> {
    /// True if a node at `depth` may not be expanded.
    #[inline]
    pub fn at_depth_limit(&self, depth: usize) -> bool {
        self.depth_limit.is_some_and(|limit| depth >= limit)
    }
}

/// Applicable actions and their successors, in declaration order.
pub(crate) fn successors<'a, 's>(
    actions: &'a [Action],
    state: &'s State,
) -> impl Iterator<Item = (ActionId, &'a Action, State)> + 's
where
    'a: 's,
{
    actions.iter().enumerate().filter_map(move |(i, action)| {
        action
            .successor(state)
            .map(|next| (ActionId::new(i), action, next))
    })
}

/// Result of a search before it is wrapped into a plan.
pub(crate) type SearchOutcome = Result<Vec<ActionId>>;

/// The failure to report once the frontier is empty.
pub(crate) fn exhausted(scope: &SearchScope) -> SolveError {
    if scope.stats().depth_pruned > 0 {
        SolveError::BudgetExceeded(BudgetKind::DepthLimit)
    } else {
        SolveError::NoPlanFound
    }
}

#[cfg(test)]
mod tests;
