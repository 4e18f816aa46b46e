//! Per-search scope: clock, counters and progress reporting.

use std::time::{Duration, Instant};

use tracing::Level;

use crate::stats::SearchStats;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(1);

/// Level of the throttled `progress` event; enabled by the console's
/// default filter.
pub const PROGRESS_LEVEL: Level = Level::INFO;

/// Mutable bookkeeping for one `solve` call.
///
/// Terminations read it; search strategies update it.
#[derive(Debug)]
pub struct SearchScope {
    start_time: Instant,
    stats: SearchStats,
    last_progress_time: Instant,
    last_progress_expansions: u64,
}

impl SearchScope {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            stats: SearchStats::default(),
            last_progress_time: now,
            last_progress_expansions: 0,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut SearchStats {
        &mut self.stats
    }

    pub fn expansions(&self) -> u64 {
        self.stats.expansions
    }

    /// Logs a `progress` event if a second has passed since the last one.
    pub fn report_progress(&mut self, frontier: usize, depth: usize) {
        let now = Instant::now();
        let since = now.duration_since(self.last_progress_time);
        if since < PROGRESS_INTERVAL {
            return;
        }
        let delta = self.stats.expansions - self.last_progress_expansions;
        let speed = (delta as f64 / since.as_secs_f64()) as u64;
        tracing::event!(
            PROGRESS_LEVEL,
            event = "progress",
            expansions = self.stats.expansions,
            frontier,
            depth,
            speed,
        );
        self.last_progress_time = now;
        self.last_progress_expansions = self.stats.expansions;
    }

    /// Stops the clock and returns the collected statistics.
    pub fn finish(mut self) -> SearchStats {
        self.stats.elapsed = self.start_time.elapsed();
        self.stats
    }
}

impl Default for SearchScope {
    fn default() -> Self {
        Self::new()
    }
}
