//! Proposition registry.
//!
//! Names are registered first; the registry is then frozen inside a
//! [`Domain`](crate::Domain) and its length becomes the bit width of every
//! state and mask in that domain.

use std::collections::HashMap;
use std::fmt;

use crate::error::{DomainError, Result};

/// Dense index of a proposition, `0..N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PropositionId(u32);

impl PropositionId {
    /// # Panics
    ///
    /// Panics if `index` does not fit in a `u32`.
    pub(crate) fn new(index: usize) -> Self {
        Self(u32::try_from(index).expect("proposition index exceeds u32::MAX"))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PropositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// Maps proposition names to bit positions and back.
///
/// # Example
///
/// ```
/// use planforge_core::PropositionRegistry;
///
/// let mut registry = PropositionRegistry::new();
/// let home = registry.register("at_home").unwrap();
/// let keys = registry.register("have_keys").unwrap();
///
/// assert_eq!(home.index(), 0);
/// assert_eq!(keys.index(), 1);
/// assert_eq!(registry.name(keys), "have_keys");
/// assert!(registry.register("at_home").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropositionRegistry {
    names: Vec<String>,
    ids: HashMap<String, PropositionId>,
}

impl PropositionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new name, failing if it is already known.
    pub fn register(&mut self, name: impl Into<String>) -> Result<PropositionId> {
        let name = name.into();
        if self.ids.contains_key(&name) {
            return Err(DomainError::DuplicateProposition(name));
        }
        Ok(self.insert(name))
    }

    /// Returns the id of `name`, registering it if needed.
    pub fn get_or_register(&mut self, name: &str) -> PropositionId {
        match self.ids.get(name) {
            Some(&id) => id,
            None => self.insert(name.to_string()),
        }
    }

    fn insert(&mut self, name: String) -> PropositionId {
        let id = PropositionId::new(self.names.len());
        self.names.push(name.clone());
        self.ids.insert(name, id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<PropositionId> {
        self.ids.get(name).copied()
    }

    /// Like [`lookup`](Self::lookup), but unknown names are an error.
    pub fn resolve(&self, name: &str) -> Result<PropositionId> {
        self.lookup(name)
            .ok_or_else(|| DomainError::UnknownProposition(name.to_string()))
    }

    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    pub fn name(&self, id: PropositionId) -> &str {
        &self.names[id.index()]
    }

    /// Number of registered propositions, which is the state bit width.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates in index order.
    pub fn iter(&self) -> impl Iterator<Item = (PropositionId, &str)> {
        self.names
            .iter()
            .enumerate()
            .map(|(i, name)| (PropositionId::new(i), name.as_str()))
    }
}
