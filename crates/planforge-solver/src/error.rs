//! Search outcomes other than a plan.

use std::fmt;

use planforge_core::{DomainError, PreconditionViolation};
use thiserror::Error;

/// Which budget stopped the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetKind {
    /// The node-expansion limit was reached.
    NodeLimit,
    /// Nodes were cut at the depth limit and nothing else was left.
    DepthLimit,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The external cancellation flag was raised.
    Cancelled,
}

impl fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetKind::NodeLimit => write!(f, "node limit"),
            BudgetKind::DepthLimit => write!(f, "depth limit"),
            BudgetKind::TimeLimit => write!(f, "time limit"),
            BudgetKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Why `solve` returned without a plan.
///
/// `NoPlanFound` and `BudgetExceeded` are ordinary outcomes. Only
/// `NoPlanFound` proves that no plan exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The goal requires some proposition to be both true and false.
    #[error("goal is unsatisfiable: required-true and required-false overlap")]
    Unsatisfiable,

    /// Every reachable state was explored without reaching the goal.
    #[error("no plan exists")]
    NoPlanFound,

    /// The search stopped early; a plan may or may not exist.
    #[error("search budget exceeded: {0}")]
    BudgetExceeded(BudgetKind),

    /// The initial state, goal and actions do not share one bit width.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An action was applied where it is not applicable.
    #[error(transparent)]
    PreconditionViolation(#[from] PreconditionViolation),

    /// The worker pool for parallel expansion could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Result type alias for search.
pub type Result<T> = std::result::Result<T, SolveError>;

/// Why a plan failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("step {step} ({action}) is not applicable")]
    NotApplicable { step: usize, action: String },

    #[error("plan does not reach the goal")]
    GoalNotReached,
}
