//! Domain constraints (`if X then Y1 and Y2 ...`).
//!
//! A constraint is a state invariant. The domain builder closes every
//! action's precondition and effect literals under the constraints, so that
//! an effect like "now holding the wrench" also deletes "wrench in the boot".

use std::fmt;

use crate::error::{DomainError, Result};
use crate::literal::{Literal, LiteralSet};
use crate::proposition::{PropositionId, PropositionRegistry};
use crate::state::State;

/// An implication between literals, resolved against a registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    when: (PropositionId, bool),
    then: Vec<(PropositionId, bool)>,
    label: String,
}

impl Constraint {
    pub fn new(registry: &PropositionRegistry, when: &Literal, then: &[Literal]) -> Result<Self> {
        let resolve = |lit: &Literal| -> Result<(PropositionId, bool)> {
            Ok((registry.resolve(&lit.name)?, lit.positive))
        };
        let label = format!(
            "[{} => {}]",
            when,
            then.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" & ")
        );
        Ok(Self {
            when: resolve(when)?,
            then: then.iter().map(resolve).collect::<Result<_>>()?,
            label,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// True unless the trigger holds in `state` while some consequence fails.
    pub fn holds_in(&self, state: &State) -> bool {
        let matches = |(id, positive): (PropositionId, bool)| state.holds(id) == positive;
        !matches(self.when) || self.then.iter().copied().all(matches)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Adds the consequences of every triggered constraint to `set`, repeating
/// until nothing changes.
pub fn close(
    constraints: &[Constraint],
    registry: &PropositionRegistry,
    set: &mut LiteralSet,
) -> Result<()> {
    let mut changed = true;
    while changed {
        changed = false;
        for constraint in constraints {
            let (when, positive) = constraint.when;
            if !set.contains(when, positive) {
                continue;
            }
            for &(id, value) in &constraint.then {
                if set.contains(id, value) {
                    continue;
                }
                if !set.insert(id, value) {
                    let literal = Literal {
                        name: registry.name(id).to_string(),
                        positive: value,
                    };
                    return Err(DomainError::IncompatibleConstraint {
                        constraint: constraint.label.clone(),
                        literal: literal.to_string(),
                    });
                }
                changed = true;
            }
        }
    }
    Ok(())
}
