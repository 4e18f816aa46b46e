//! PlanForge - A bit-vector forward planner in Rust
//!
//! Build a [`Domain`] once, pose [`Problem`]s against it and hand them to a
//! [`Solver`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use planforge::prelude::*;
//!
//! let domain = Arc::new(
//!     DomainBuilder::new("door")
//!         .action(ActionDef::new("open").must("closed").then("not closed"))
//!         .action(ActionDef::new("close").must("not closed").then("closed"))
//!         .build()
//!         .unwrap(),
//! );
//! let problem = domain.problem(["closed"], ["not closed"]).unwrap();
//!
//! let result = Solver::new().solve(&problem);
//! assert_eq!(result.plan().unwrap().names(), vec!["open"]);
//! ```

// Model
pub use planforge_core::{
    Action, ActionDef, ActionId, Bindings, BitSet, Constraint, ConstraintDef, Domain,
    DomainBuilder, DomainError, Goal, Literal, PreconditionViolation, Problem, PropositionId,
    PropositionRegistry, State,
};

// Configuration
pub use planforge_config::{
    ConfigError, HeuristicType, PlannerConfig, SearchStrategy, TerminationConfig, ThreadCount,
};

// Search
pub use planforge_solver::{
    solve, BudgetKind, FnHeuristic, GoalCountHeuristic, Heuristic, MaxCostHeuristic, Plan,
    PlanError, SearchStats, SolveError, SolveResult, Solver, ZeroHeuristic,
};

#[cfg(feature = "console")]
pub mod console;

pub mod prelude {
    pub use super::{ActionDef, Bindings, ConstraintDef, Domain, DomainBuilder, Goal, Problem, State};
    pub use super::{HeuristicType, PlannerConfig, SearchStrategy, ThreadCount};
    pub use super::{solve, Plan, SolveError, SolveResult, Solver};
}
