//! Hybrid sets: multisets whose elements carry signed multiplicities.
//!
//! A positive multiplicity is ordinary membership, a negative one is a
//! deficit of that element. See [`HybridSet`].

pub mod error;
pub mod hash;
mod ops;
pub mod relation;

use std::hash::Hash;

pub use error::{HybridSetError, Result};
pub use hash::{HybridSet, IntHybridSet};
pub use relation::dominance;

/// Signed number of occurrences of an element
pub type Multiplicity = i64;

/// A value that contains its own key
///
/// Two values with the same key are the same element as far as a
/// [`HybridSet`] is concerned, whatever else they carry.
pub trait Dual {
    type Key: Clone + Ord + Hash;
    fn key(&self) -> &Self::Key;
    /// Compare key and payload
    ///
    /// Sets never call this; it exists for direct comparisons between
    /// element values.
    fn fully_eq(&self, other: &Self) -> bool
    where
        Self: PartialEq,
    {
        self == other
    }
}

macro_rules! self_keyed {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Dual for $ty {
                type Key = $ty;
                fn key(&self) -> &Self::Key {
                    self
                }
            }
        )*
    };
}

self_keyed!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char, String);

impl<'a> Dual for &'a str {
    type Key = &'a str;
    fn key(&self) -> &Self::Key {
        self
    }
}
