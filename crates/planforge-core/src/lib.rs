//! PlanForge Core - bit-vector planning model
//!
//! This crate provides the value types the search engine works on:
//! - `PropositionRegistry` assigning each named fact a bit position
//! - `BitSet` and `State`, fixed-width bit vectors over those positions
//! - `Action` and `Goal`, precondition/effect and acceptance masks
//! - `DomainBuilder`, `Domain` and `Problem` for two-phase construction
//! - `Bindings` and parameterised `ActionDef`/`ConstraintDef` schemas

pub mod action;
pub mod bits;
pub mod constraint;
pub mod domain;
pub mod error;
pub mod goal;
pub mod literal;
pub mod proposition;
pub mod schema;
pub mod state;

pub use action::{Action, ActionId};
pub use bits::BitSet;
pub use constraint::Constraint;
pub use domain::{ActionDef, ConstraintDef, Domain, DomainBuilder, Problem};
pub use error::{DomainError, PreconditionViolation, Result};
pub use goal::Goal;
pub use literal::{Literal, LiteralSet};
pub use proposition::{PropositionId, PropositionRegistry};
pub use schema::Bindings;
pub use state::State;
