//! Layer-parallel breadth-first search.
//!
//! Each depth layer is expanded in batches. Successor generation for a
//! batch runs on a rayon pool, and the results are merged on the calling
//! thread in node order and declaration order, which is exactly the order
//! the sequential search visits them in. Plans, outcomes and counters
//! therefore match the sequential search; only wall-clock time differs.
//!
//! Budgets are checked before every batch as well as before every merged
//! expansion, and a batch never holds more nodes than the node budget has
//! left, so a wide layer is not generated past an exhausted budget.

use std::collections::HashSet;

use planforge_core::{ActionId, State};
use rayon::prelude::*;
use rayon::ThreadPool;
use smallvec::SmallVec;
use tracing::trace;

use super::{exhausted, successors, SearchContext, SearchOutcome};
use crate::error::SolveError;
use crate::node::{NodeArena, NodeId, SearchNode};
use crate::scope::SearchScope;

type Successors = SmallVec<[(ActionId, u32, State); 4]>;

/// Layer nodes handed to each worker per batch.
const NODES_PER_WORKER: usize = 16;

pub(crate) fn parallel_breadth_first(
    ctx: &SearchContext<'_>,
    initial: &State,
    scope: &mut SearchScope,
    pool: &ThreadPool,
) -> SearchOutcome {
    let mut arena = NodeArena::new();
    let mut visited: HashSet<State> = HashSet::new();
    let workers = pool.current_num_threads();

    visited.insert(initial.clone());
    let mut layer: Vec<NodeId> = vec![arena.push(SearchNode::root(initial.clone()))];
    let mut depth = 0;

    while !layer.is_empty() {
        if ctx.at_depth_limit(depth) {
            for _ in &layer {
                scope.stats_mut().record_depth_pruned();
            }
            break;
        }

        let mut next_layer = Vec::new();
        let mut start = 0;
        while start < layer.len() {
            if let Some(kind) = ctx.termination.check(scope) {
                return Err(SolveError::BudgetExceeded(kind));
            }
            let len = batch_len(
                layer.len() - start,
                workers,
                ctx.termination.expansions_left(scope),
            );
            let batch = &layer[start..start + len];

            let actions = ctx.actions;
            let expanded: Vec<Successors> = {
                let arena = &arena;
                pool.install(|| {
                    batch
                        .par_iter()
                        .map(|&id| {
                            successors(actions, arena.get(id).state())
                                .map(|(action_id, action, next)| (action_id, action.cost(), next))
                                .collect()
                        })
                        .collect()
                })
            };

            for (offset, (&id, children)) in batch.iter().zip(expanded).enumerate() {
                if let Some(kind) = ctx.termination.check(scope) {
                    return Err(SolveError::BudgetExceeded(kind));
                }
                scope.stats_mut().record_expansion();
                let remaining = layer.len() - (start + offset) - 1;
                trace!(
                    event = "expand",
                    node = id.index(),
                    depth,
                    frontier = remaining + next_layer.len(),
                );

                for (action_id, cost, next) in children {
                    let fresh = visited.insert(next.clone());
                    scope.stats_mut().record_generated(!fresh);
                    if !fresh {
                        continue;
                    }

                    scope.stats_mut().record_goal_test();
                    let reached = ctx.goal.satisfied(&next);
                    let child = SearchNode::child(id, arena.get(id), action_id, next, cost);
                    let child_id = arena.push(child);
                    scope.stats_mut().record_depth(depth + 1);

                    if reached {
                        return Ok(arena.path_to(child_id));
                    }
                    next_layer.push(child_id);
                    scope
                        .stats_mut()
                        .record_frontier(remaining + next_layer.len());
                }

                scope.report_progress(remaining + next_layer.len(), depth);
            }

            start += len;
        }

        layer = next_layer;
        depth += 1;
    }

    Err(exhausted(scope))
}

/// Number of layer nodes to expand in the next batch.
///
/// At least one node, at most `NODES_PER_WORKER` per worker and never more
/// than the expansions the node budget still allows.
fn batch_len(remaining: usize, workers: usize, expansions_left: Option<u64>) -> usize {
    let cap = workers.max(1) * NODES_PER_WORKER;
    let budget = expansions_left.map_or(usize::MAX, |n| usize::try_from(n).unwrap_or(usize::MAX));
    remaining.min(cap).min(budget).max(1)
}
