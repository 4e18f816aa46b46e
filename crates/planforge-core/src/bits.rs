//! Fixed-width bit vectors.
//!
//! A `BitSet` is sized once, from the proposition count of a frozen
//! registry, and every set in one domain shares that width. Domains with up
//! to 128 propositions stay inline without a heap allocation.

use std::fmt;

use smallvec::SmallVec;

const WORD_BITS: usize = 64;

type Words = SmallVec<[u64; 2]>;

/// A dense bit vector over proposition indices.
///
/// Equality and hashing are by bit pattern, which is what lets the search
/// engine key its visited set by value.
///
/// # Example
///
/// ```
/// use planforge_core::BitSet;
///
/// let a = BitSet::from_indices(70, [0, 3, 65]);
/// let b = BitSet::from_indices(70, [3, 65]);
///
/// assert!(a.is_superset_of(&b));
/// assert_eq!(a.difference(&b), BitSet::from_indices(70, [0]));
/// assert_eq!(a.count_ones(), 3);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct BitSet {
    words: Words,
}

#[inline]
fn word_count(width: usize) -> usize {
    width.div_ceil(WORD_BITS)
}

impl BitSet {
    /// Creates an all-zero set able to hold `width` bits.
    pub fn empty(width: usize) -> Self {
        Self {
            words: SmallVec::from_elem(0, word_count(width)),
        }
    }

    /// Creates a set of the given width with the listed bits set.
    ///
    /// # Panics
    ///
    /// Panics if an index is outside the width.
    pub fn from_indices(width: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::empty(width);
        for index in indices {
            assert!(index < width, "bit {index} out of range for width {width}");
            set.insert(index);
        }
        set
    }

    /// Number of 64-bit words backing this set.
    #[inline]
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Sets bit `index`.
    pub fn insert(&mut self, index: usize) {
        self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
    }

    /// Clears bit `index`.
    pub fn remove(&mut self, index: usize) {
        self.words[index / WORD_BITS] &= !(1u64 << (index % WORD_BITS));
    }

    /// Returns whether bit `index` is set. Out-of-range indices are unset.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / WORD_BITS)
            .is_some_and(|w| w & (1u64 << (index % WORD_BITS)) != 0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    #[inline]
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// True iff every bit set in `other` is also set here.
    #[inline]
    pub fn is_superset_of(&self, other: &BitSet) -> bool {
        debug_assert_eq!(self.words.len(), other.words.len());
        self.words
            .iter()
            .zip(&other.words)
            .all(|(a, b)| a & b == *b)
    }

    /// True iff no bit is set in both.
    #[inline]
    pub fn is_disjoint_from(&self, other: &BitSet) -> bool {
        debug_assert_eq!(self.words.len(), other.words.len());
        self.words.iter().zip(&other.words).all(|(a, b)| a & b == 0)
    }

    #[inline]
    pub fn intersects(&self, other: &BitSet) -> bool {
        !self.is_disjoint_from(other)
    }

    pub fn union(&self, other: &BitSet) -> BitSet {
        self.zip_with(other, |a, b| a | b)
    }

    pub fn intersection(&self, other: &BitSet) -> BitSet {
        self.zip_with(other, |a, b| a & b)
    }

    pub fn difference(&self, other: &BitSet) -> BitSet {
        self.zip_with(other, |a, b| a & !b)
    }

    /// Returns `(self & !del) | add`. Deletions are applied first.
    #[inline]
    pub fn apply(&self, add: &BitSet, del: &BitSet) -> BitSet {
        debug_assert_eq!(self.words.len(), add.words.len());
        debug_assert_eq!(self.words.len(), del.words.len());
        BitSet {
            words: self
                .words
                .iter()
                .zip(&add.words)
                .zip(&del.words)
                .map(|((w, a), d)| (w & !d) | a)
                .collect(),
        }
    }

    /// Iterates the indices of set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let mut rest = word;
            std::iter::from_fn(move || {
                if rest == 0 {
                    return None;
                }
                let bit = rest.trailing_zeros() as usize;
                rest &= rest - 1;
                Some(i * WORD_BITS + bit)
            })
        })
    }

    fn zip_with(&self, other: &BitSet, f: impl Fn(u64, u64) -> u64) -> BitSet {
        debug_assert_eq!(self.words.len(), other.words.len());
        BitSet {
            words: self
                .words
                .iter()
                .zip(&other.words)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }
}

impl fmt::Debug for BitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter_ones()).finish()
    }
}
