//! Errors reported by the checked hybrid set operations

use thiserror::Error;

/// Failure of a checked [`HybridSet`](crate::HybridSet) operation
///
/// The unchecked operations and operators panic with the same message
/// instead of returning it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum HybridSetError {
    /// Multiplicity arithmetic left the range of [`Multiplicity`](crate::Multiplicity)
    #[error("multiplicity overflow")]
    Overflow,
    /// The complement was requested relative to a set that does not
    /// naturally contain the receiver
    #[error("not a natural subset of the containing set")]
    NotNaturalSubset,
}

pub type Result<T> = std::result::Result<T, HybridSetError>;
