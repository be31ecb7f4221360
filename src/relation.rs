//! Inclusion relations between hybrid sets

use std::hash::BuildHasher;

use log::debug;

use crate::{
    error::{HybridSetError, Result},
    Dual, HybridSet, Multiplicity,
};

/// Signed partial order on multiplicities
///
/// A negative `reference` is dominated by every `candidate` at least as
/// negative. A nonnegative `reference` is dominated by every `candidate`
/// in `0..=reference`.
#[must_use]
pub fn dominance(candidate: Multiplicity, reference: Multiplicity) -> bool {
    dominates(i128::from(candidate), i128::from(reference))
}

// Widened so that `reference - candidate` cannot overflow.
fn dominates(candidate: i128, reference: i128) -> bool {
    if reference < 0 {
        candidate <= reference
    } else {
        (0..=reference).contains(&candidate)
    }
}

impl<T, S> HybridSet<T, S>
where
    T: Dual,
    S: BuildHasher,
{
    /// Check if this set is included in `other`
    ///
    /// Every element of `other` must have its multiplicity there dominate
    /// either the multiplicity here or what remains after taking it away.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        other.iter().all(|(value, reference)| {
            let candidate = i128::from(self.count(value.key()));
            let reference = i128::from(reference);
            dominates(candidate, reference) || dominates(reference - candidate, reference)
        })
    }
    /// Check if `other` is included in this set
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }
    /// Check if this set is a natural subset of `other`
    ///
    /// Every element here must be in `other`, and each positive multiplicity
    /// here must not exceed the one in `other`. An element with a negative
    /// multiplicity here is never accepted.
    #[must_use]
    pub fn is_natural_subset_of(&self, other: &Self) -> bool {
        self.keys().all(|key| other.contains(key))
            && self
                .iter()
                .filter(|&(_, m)| m > 0)
                .all(|(value, m)| m <= other.count(value.key()))
            // Tested against our own count, so any negative entry fails.
            && self
                .iter()
                .filter(|&(_, m)| m < 0)
                .all(|(_, m)| m >= 0)
    }
    /// Check if no element is in both sets
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.keys().all(|key| !other.contains(key))
    }
}

impl<T, S> HybridSet<T, S>
where
    T: Dual + Clone,
    S: BuildHasher + Clone,
{
    /// Get the complement of this set in `other`
    ///
    /// This is `other - self` when this set is a natural subset of
    /// `other`, and the empty set otherwise. Use
    /// [`HybridSet::try_complement_of`] to tell the two apart.
    #[must_use]
    #[track_caller]
    pub fn complement_of(&self, other: &Self) -> Self {
        if self.is_natural_subset_of(other) {
            other.difference(self)
        } else {
            debug!("complement of a set that is not a natural subset; using the empty set");
            Self::with_hasher(other.hasher().clone())
        }
    }
    /// Get the complement of this set in `other`, failing with
    /// [`HybridSetError::NotNaturalSubset`] when it is not defined
    pub fn try_complement_of(&self, other: &Self) -> Result<Self> {
        if !self.is_natural_subset_of(other) {
            return Err(HybridSetError::NotNaturalSubset);
        }
        other.try_difference(self)
    }
}
