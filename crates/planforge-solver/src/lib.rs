//! PlanForge Solver - forward state-space search
//!
//! This crate provides:
//! - Breadth-first, best-first and greedy best-first search
//! - Heuristics over bit-vector states
//! - Node, depth, time and external budgets
//! - Plans that can be replayed and validated
//! - Search statistics and structured progress logging

pub mod error;
pub mod heuristic;
pub mod node;
pub mod plan;
pub mod scope;
mod search;
pub mod solver;
pub mod stats;
pub mod termination;

pub use error::{BudgetKind, PlanError, Result, SolveError};
pub use heuristic::{
    FnHeuristic, GoalCountHeuristic, Heuristic, MaxCostHeuristic, ZeroHeuristic,
};
pub use plan::Plan;
pub use scope::SearchScope;
pub use solver::{solve, SolveResult, Solver};
pub use stats::SearchStats;
pub use termination::{
    ExternalTermination, NodeCountTermination, OrTermination, Termination, TimeTermination,
};

pub use planforge_config::{HeuristicType, PlannerConfig, SearchStrategy, ThreadCount};
