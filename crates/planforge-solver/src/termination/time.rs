//! Time-based termination.

use std::time::Duration;

use super::Termination;
use crate::error::BudgetKind;
use crate::scope::SearchScope;

/// Terminates after a time limit.
///
/// A zero limit terminates at the first expansion boundary.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use planforge_solver::termination::TimeTermination;
///
/// let term = TimeTermination::new(Duration::from_secs(30));
///
/// // Or use convenience constructors
/// let term = TimeTermination::seconds(30);
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl Termination for TimeTermination {
    fn check(&self, scope: &SearchScope) -> Option<BudgetKind> {
        (scope.elapsed() >= self.limit).then_some(BudgetKind::TimeLimit)
    }
}
