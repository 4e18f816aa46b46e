//! Error types for domain construction

use thiserror::Error;

/// Errors raised while building a domain or a problem.
///
/// All of these are construction-time failures: a domain that built
/// successfully never produces them during search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A name was referenced that the registry does not know.
    #[error("unknown proposition: {0}")]
    UnknownProposition(String),

    /// The same proposition was declared twice.
    #[error("duplicate proposition: {0}")]
    DuplicateProposition(String),

    /// Two actions share a name.
    #[error("duplicate action: {0}")]
    DuplicateAction(String),

    /// An action both adds and deletes the same propositions.
    #[error("action {action} both adds and deletes: {}", overlapping.join(", "))]
    InvalidAction {
        action: String,
        overlapping: Vec<String>,
    },

    /// An action requires propositions to be both true and false.
    #[error("action {action} requires both true and false: {}", overlapping.join(", "))]
    ContradictoryPrecondition {
        action: String,
        overlapping: Vec<String>,
    },

    /// Closing a literal set under the domain constraints produced a conflict.
    #[error("constraint {constraint} conflicts with {literal}")]
    IncompatibleConstraint { constraint: String, literal: String },

    /// The initial state breaks one of the domain constraints.
    #[error("initial state violates constraint {constraint}")]
    InitialStateViolatesConstraint { constraint: String },

    /// A literal string could not be parsed.
    #[error("invalid literal: {0:?}")]
    InvalidLiteral(String),

    /// A schema variable has a type with no bound objects.
    #[error("schema {schema}: no objects bound to type {kind}")]
    UnknownType { schema: String, kind: String },

    /// A schema inequality names a variable it never declares.
    #[error("schema {schema}: undeclared variable {var}")]
    UnknownVariable { schema: String, var: String },

    /// A schema declares the same variable twice.
    #[error("schema {schema}: variable {var} declared twice")]
    DuplicateVariable { schema: String, var: String },

    /// A bindings line lists objects before any `type:` prefix.
    #[error("objects without a type: {0:?}")]
    InvalidBinding(String),

    /// Two bit vectors of different widths were combined.
    #[error("bit width mismatch: expected {expected} words, found {found}")]
    WidthMismatch { expected: usize, found: usize },
}

/// Returned by [`Action::apply`](crate::Action::apply) when the action's
/// preconditions do not hold in the given state.
///
/// A correct search engine checks applicability first, so seeing this error
/// means an engine bug rather than a modelling mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("precondition of action {action} does not hold")]
pub struct PreconditionViolation {
    pub action: String,
}

/// Result type alias for domain construction.
pub type Result<T> = std::result::Result<T, DomainError>;
