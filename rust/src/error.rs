//! Error handling and result types for tree construction and validation.
//!
//! Lookup misses are not errors anywhere in this crate; they are `None`
//! results. The error type covers the conditions that are detected eagerly
//! at construction time, plus invariant violations surfaced by the
//! validation module.

use thiserror::Error;

use crate::types::KeyType;

/// Error type for range tree operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeTreeError {
    /// The key shape of the input mapping does not match the requested
    /// [`KeyType`] (plain keys for `TwoColumn`, or interval keys for a
    /// single-bound key type).
    #[error("key shape mismatch: {0}")]
    KeyShapeMismatch(String),
    /// A two-column interval has a lower bound greater than its upper bound.
    #[error("invalid interval: {0}")]
    InvalidInterval(String),
    /// Two two-column intervals overlap; interval sets must be disjoint.
    #[error("overlapping intervals: {0}")]
    OverlappingIntervals(String),
    /// Internal data structure integrity violation.
    #[error("data integrity error: {0}")]
    DataIntegrityError(String),
}

impl RangeTreeError {
    /// Create a KeyShapeMismatch error for a key type / constructor pair.
    pub fn key_shape_mismatch(key_type: KeyType, expected: &str) -> Self {
        Self::KeyShapeMismatch(format!(
            "key type {:?} requires {} keys",
            key_type, expected
        ))
    }

    /// Create an InvalidInterval error for the interval at `position`
    /// (index in lower-bound order).
    pub fn invalid_interval(position: usize) -> Self {
        Self::InvalidInterval(format!(
            "interval at position {} has lower bound > upper bound",
            position
        ))
    }

    /// Create an OverlappingIntervals error for two adjacent positions
    /// (indices in lower-bound order).
    pub fn overlapping_intervals(first: usize, second: usize) -> Self {
        Self::OverlappingIntervals(format!(
            "intervals at positions {} and {} overlap",
            first, second
        ))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }
}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, RangeTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, RangeTreeError>;
