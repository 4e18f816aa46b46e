//! Node-expansion budget.

use super::Termination;
use crate::error::BudgetKind;
use crate::scope::SearchScope;

/// Terminates once a number of nodes has been expanded.
///
/// # Example
///
/// ```
/// use planforge_solver::termination::NodeCountTermination;
///
/// // Expand at most 10,000 nodes
/// let term = NodeCountTermination::new(10_000);
/// ```
#[derive(Debug, Clone)]
pub struct NodeCountTermination {
    limit: u64,
}

impl NodeCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl Termination for NodeCountTermination {
    fn check(&self, scope: &SearchScope) -> Option<BudgetKind> {
        (scope.expansions() >= self.limit).then_some(BudgetKind::NodeLimit)
    }

    fn expansions_left(&self, scope: &SearchScope) -> Option<u64> {
        Some(self.limit.saturating_sub(scope.expansions()))
    }
}
