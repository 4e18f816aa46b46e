//! External termination via AtomicBool flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::Termination;
use crate::error::BudgetKind;
use crate::scope::SearchScope;

/// Terminates when an external flag is set.
///
/// Lets another thread, or a Ctrl-C handler, interrupt a running search.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use planforge_solver::termination::ExternalTermination;
///
/// let flag = Arc::new(AtomicBool::new(false));
/// let term = ExternalTermination::new(Arc::clone(&flag));
///
/// // Later: flag.store(true, Ordering::SeqCst);
/// # flag.store(true, Ordering::SeqCst);
/// ```
#[derive(Debug, Clone)]
pub struct ExternalTermination {
    flag: Arc<AtomicBool>,
}

impl ExternalTermination {
    /// Creates a termination that checks the given flag.
    pub fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }
}

impl Termination for ExternalTermination {
    fn check(&self, _scope: &SearchScope) -> Option<BudgetKind> {
        self.flag
            .load(Ordering::Relaxed)
            .then_some(BudgetKind::Cancelled)
    }
}
