//! Sequential breadth-first search.

use std::collections::{HashSet, VecDeque};

use planforge_core::State;
use tracing::trace;

use super::{exhausted, successors, SearchContext, SearchOutcome};
use crate::error::SolveError;
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::scope::SearchScope;

/// Explores states in order of action count from `initial`.
///
/// Successors are goal-tested when generated, so the first hit is a
/// shortest plan. The caller handles contradictory and already-satisfied
/// goals.
pub(crate) fn breadth_first(
    ctx: &SearchContext<'_>,
    initial: &State,
    scope: &mut SearchScope,
) -> SearchOutcome {
    let mut arena = NodeArena::new();
    let mut visited: HashSet<State> = HashSet::new();
    let mut frontier: VecDeque<NodeId> = VecDeque::new();

    visited.insert(initial.clone());
    frontier.push_back(arena.push(SearchNode::root(initial.clone())));

    while let Some(id) = frontier.pop_front() {
        let node = arena.get(id);
        let depth = node.depth();

        if ctx.at_depth_limit(depth) {
            scope.stats_mut().record_depth_pruned();
            continue;
        }
        if let Some(kind) = ctx.termination.check(scope) {
            return Err(SolveError::BudgetExceeded(kind));
        }

        scope.stats_mut().record_expansion();
        trace!(
            event = "expand",
            node = id.index(),
            depth,
            frontier = frontier.len(),
        );

        let state = node.state().clone();
        for (action_id, action, next) in successors(ctx.actions, &state) {
            let fresh = visited.insert(next.clone());
            scope.stats_mut().record_generated(!fresh);
            if !fresh {
                continue;
            }

            scope.stats_mut().record_goal_test();
            let reached = ctx.goal.satisfied(&next);
            let child = SearchNode::child(id, arena.get(id), action_id, next, action.cost());
            let child_id = arena.push(child);
            scope.stats_mut().record_depth(depth + 1);

            if reached {
                return Ok(arena.path_to(child_id));
            }
            frontier.push_back(child_id);
            scope.stats_mut().record_frontier(frontier.len());
        }

        scope.report_progress(frontier.len(), depth);
    }

    Err(exhausted(scope))
}
