//! Budgets checked at every node-expansion boundary.

mod composite;
mod external;
mod node_count;
mod time;

use std::fmt::Debug;

use crate::error::BudgetKind;
use crate::scope::SearchScope;

pub use composite::OrTermination;
pub use external::ExternalTermination;
pub use node_count::NodeCountTermination;
pub use time::TimeTermination;

/// Decides when a search must stop before exhausting its frontier.
pub trait Termination: Send + Debug {
    /// Returns the exhausted budget, or `None` to keep searching.
    fn check(&self, scope: &SearchScope) -> Option<BudgetKind>;

    /// Expansions still allowed before this budget stops the search, if it
    /// counts expansions at all.
    fn expansions_left(&self, _scope: &SearchScope) -> Option<u64> {
        None
    }
}

impl<T: Termination> Termination for Option<T> {
    fn check(&self, scope: &SearchScope) -> Option<BudgetKind> {
        self.as_ref().and_then(|t| t.check(scope))
    }

    fn expansions_left(&self, scope: &SearchScope) -> Option<u64> {
        self.as_ref().and_then(|t| t.expansions_left(scope))
    }
}

/// Never terminates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTermination;

impl Termination for NoTermination {
    fn check(&self, _scope: &SearchScope) -> Option<BudgetKind> {
        None
    }
}

#[cfg(test)]
mod tests;
