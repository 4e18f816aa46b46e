//! Best-first search over a priority queue.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use planforge_core::State;
use tracing::trace;

use super::{exhausted, successors, SearchContext, SearchOutcome};
use crate::error::SolveError;
use crate::heuristic::Heuristic;
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::scope::SearchScope;

/// How a node's priority is computed from its path cost `g` and estimate `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PriorityMode {
    /// `g + h`; a state is reopened when reached more cheaply.
    CostPlusEstimate,
    /// `h` alone; the first path to a state is kept.
    EstimateOnly,
}

impl PriorityMode {
    fn priority(self, g: u64, h: u64) -> u64 {
        match self {
            PriorityMode::CostPlusEstimate => g.saturating_add(h),
            PriorityMode::EstimateOnly => h,
        }
    }
}

/// A frontier entry. Lower priority pops first, then lower estimate, then
/// earlier insertion.
#[derive(Debug)]
struct PriorityNode {
    priority: u64,
    estimate: u64,
    seq: u64,
    id: NodeId,
}

impl PartialEq for PriorityNode {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for PriorityNode {}

impl Ord for PriorityNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse every key.
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.estimate.cmp(&self.estimate))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for PriorityNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pops the most promising node, goal-tests it, then expands it.
///
/// Testing at pop rather than at generation is what makes the `g + h`
/// mode return minimum-cost plans under an admissible heuristic.
pub(crate) fn best_first(
    ctx: &SearchContext<'_>,
    initial: &State,
    heuristic: &dyn Heuristic,
    mode: PriorityMode,
    scope: &mut SearchScope,
) -> SearchOutcome {
    let Some(root_estimate) = heuristic.estimate(initial, ctx.goal) else {
        scope.stats_mut().record_dead_end();
        return Err(exhausted(scope));
    };

    let mut arena = NodeArena::new();
    let mut best_cost: HashMap<State, u64> = HashMap::new();
    let mut frontier: BinaryHeap<PriorityNode> = BinaryHeap::new();
    let mut seq: u64 = 0;

    best_cost.insert(initial.clone(), 0);
    frontier.push(PriorityNode {
        priority: mode.priority(0, root_estimate),
        estimate: root_estimate,
        seq,
        id: arena.push(SearchNode::root(initial.clone())),
    });

    while let Some(entry) = frontier.pop() {
        let node = arena.get(entry.id);
        let (g, depth) = (node.cost(), node.depth());

        // A cheaper path to this state was queued after this entry.
        if best_cost.get(node.state()).is_some_and(|&best| best < g) {
            continue;
        }

        scope.stats_mut().record_goal_test();
        if ctx.goal.satisfied(node.state()) {
            return Ok(arena.path_to(entry.id));
        }
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
            node = entry.id.index(),
            depth,
            cost = g,
            estimate = entry.estimate,
            frontier = frontier.len(),
        );

        let state = node.state().clone();
        for (action_id, action, next) in successors(ctx.actions, &state) {
            let child_cost = g + u64::from(action.cost());
            let duplicate = match mode {
                PriorityMode::CostPlusEstimate => best_cost
                    .get(&next)
                    .is_some_and(|&best| best <= child_cost),
                PriorityMode::EstimateOnly => best_cost.contains_key(&next),
            };
            scope.stats_mut().record_generated(duplicate);
            if duplicate {
                continue;
            }
            best_cost.insert(next.clone(), child_cost);

            let Some(estimate) = heuristic.estimate(&next, ctx.goal) else {
                scope.stats_mut().record_dead_end();
                continue;
            };

            let parent = arena.get(entry.id);
            let child = SearchNode::child(entry.id, parent, action_id, next, action.cost());
            seq += 1;
            frontier.push(PriorityNode {
                priority: mode.priority(child_cost, estimate),
                estimate,
                seq,
                id: arena.push(child),
            });
            scope.stats_mut().record_frontier(frontier.len());
            scope.stats_mut().record_depth(depth + 1);
        }

        scope.report_progress(frontier.len(), depth);
    }

    Err(exhausted(scope))
}
