//! Composite termination.
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use super::Termination;
use crate::error::BudgetKind;
use crate::scope::SearchScope;

/// Terminates when ANY child terminates, reporting the first in tuple order.
///
/// # Examples
///
/// ```
/// use planforge_solver::termination::{NodeCountTermination, OrTermination, TimeTermination};
///
/// // Stop after 30 seconds or 1,000,000 expansions
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     NodeCountTermination::new(1_000_000),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn check(&self, scope: &SearchScope) -> Option<BudgetKind> {
                None$(.or_else(|| (self.0).$idx.check(scope)))+
            }

            fn expansions_left(&self, scope: &SearchScope) -> Option<u64> {
                [$((self.0).$idx.expansions_left(scope)),+]
                    .into_iter()
                    .flatten()
                    .min()
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
