//! Signed proposition references.
//!
//! Domains name preconditions, effects and goals as literals: `"name"` for a
//! proposition that must hold and `"not name"` for one that must not.

use std::fmt;

use crate::bits::BitSet;
use crate::error::{DomainError, Result};
use crate::proposition::{PropositionId, PropositionRegistry};

/// A proposition name with a truth value.
///
/// # Example
///
/// ```
/// use planforge_core::Literal;
///
/// let lit = Literal::parse("not (closed boot)").unwrap();
/// assert_eq!(lit.name, "(closed boot)");
/// assert!(!lit.positive);
/// assert_eq!(lit.to_string(), "not (closed boot)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    pub name: String,
    pub positive: bool,
}

impl Literal {
    pub fn positive(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positive: true,
        }
    }

    pub fn negative(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positive: false,
        }
    }

    /// Parses `"name"` or `"not name"`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let (name, positive) = match text.strip_prefix("not ") {
            Some(rest) => (rest.trim(), false),
            None => (text, true),
        };
        if name.is_empty() || name == "not" {
            return Err(DomainError::InvalidLiteral(text.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            positive,
        })
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.name)
        } else {
            write!(f, "not {}", self.name)
        }
    }
}

/// A partial truth assignment: propositions known true and known false.
///
/// Used while building actions and goals, where inserting a literal whose
/// opposite is already present is a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LiteralSet {
    pos: BitSet,
    neg: BitSet,
}

impl LiteralSet {
    pub fn new(width: usize) -> Self {
        Self {
            pos: BitSet::empty(width),
            neg: BitSet::empty(width),
        }
    }

    /// Wraps masks already known to be disjoint.
    pub(crate) fn from_masks(pos: BitSet, neg: BitSet) -> Self {
        debug_assert!(pos.is_disjoint_from(&neg));
        Self { pos, neg }
    }

    /// Resolves and inserts every literal, reporting the first conflict.
    pub fn from_literals<'a>(
        registry: &PropositionRegistry,
        literals: impl IntoIterator<Item = &'a Literal>,
    ) -> Result<Self> {
        let mut set = Self::new(registry.len());
        for literal in literals {
            let id = registry.resolve(&literal.name)?;
            if !set.insert(id, literal.positive) {
                return Err(DomainError::InvalidLiteral(literal.to_string()));
            }
        }
        Ok(set)
    }

    /// Inserts a literal. Returns `false`, leaving the set unchanged, if the
    /// opposite literal is already present.
    pub fn insert(&mut self, id: PropositionId, positive: bool) -> bool {
        let (same, opposite) = if positive {
            (&mut self.pos, &self.neg)
        } else {
            (&mut self.neg, &self.pos)
        };
        if opposite.contains(id.index()) {
            return false;
        }
        same.insert(id.index());
        true
    }

    pub fn contains(&self, id: PropositionId, positive: bool) -> bool {
        if positive {
            self.pos.contains(id.index())
        } else {
            self.neg.contains(id.index())
        }
    }

    pub fn positive(&self) -> &BitSet {
        &self.pos
    }

    pub fn negative(&self) -> &BitSet {
        &self.neg
    }

    pub fn into_masks(self) -> (BitSet, BitSet) {
        (self.pos, self.neg)
    }
}
