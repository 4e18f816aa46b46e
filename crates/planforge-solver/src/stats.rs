//! Search statistics.
//!
//! Counters for one `solve` call, returned alongside every outcome.

use std::time::Duration;

/// Counters collected during one search.
///
/// # Example
///
/// ```
/// use planforge_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::default();
/// stats.record_expansion();
/// stats.record_generated(false);
/// stats.record_generated(true);
/// stats.record_frontier(7);
/// stats.record_frontier(3);
///
/// assert_eq!(stats.expansions, 1);
/// assert_eq!(stats.generated, 2);
/// assert_eq!(stats.duplicates, 1);
/// assert_eq!(stats.peak_frontier, 7);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose successors were generated.
    pub expansions: u64,
    /// Successor states produced by applicable actions.
    pub generated: u64,
    /// Successors discarded because their state was already reached.
    pub duplicates: u64,
    /// Goal checks performed.
    pub goal_tests: u64,
    /// Nodes not expanded because they sat at the depth limit.
    pub depth_pruned: u64,
    /// Nodes dropped because the heuristic reported a dead end.
    pub dead_ends: u64,
    /// Largest frontier size seen.
    pub peak_frontier: usize,
    /// Deepest node generated.
    pub max_depth: usize,
    /// Wall-clock time of the search.
    pub elapsed: Duration,
}

impl SearchStats {
    pub fn record_expansion(&mut self) {
        self.expansions += 1;
    }

    /// Records a generated successor and whether it was a duplicate.
    pub fn record_generated(&mut self, duplicate: bool) {
        self.generated += 1;
        if duplicate {
            self.duplicates += 1;
        }
    }

    pub fn record_goal_test(&mut self) {
        self.goal_tests += 1;
    }

    pub fn record_depth_pruned(&mut self) {
        self.depth_pruned += 1;
    }

    pub fn record_dead_end(&mut self) {
        self.dead_ends += 1;
    }

    pub fn record_frontier(&mut self, len: usize) {
        self.peak_frontier = self.peak_frontier.max(len);
    }

    pub fn record_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    /// Returns the expansion rate.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.expansions as f64 / secs
        } else {
            0.0
        }
    }

    /// Returns the share of generated successors that were duplicates.
    pub fn duplicate_rate(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            self.duplicates as f64 / self.generated as f64
        }
    }
}
