//! Read-only balanced range trees and structural model deltas.
//!
//! This crate provides the algorithmic core of a product-modeling runtime:
//! resolving table-lookup queries against immutable, pre-sorted data, and
//! computing minimal change-sets between two versions of an object graph.
//!
//! * [`BalancedBinaryTree`] — an immutable, minimal-height binary search
//!   tree built once from a complete key set.
//! * [`ReadOnlyBinaryRangeTree`] — range-lookup semantics on top of it:
//!   lower/upper-bound matches (strict or inclusive) and two-column closed
//!   interval matches, selected via [`KeyType`].
//! * [`MultiMap`] — a key → set-of-values index used as a building block for
//!   indices over object collections.
//! * [`ModelObjectDelta`] — a structural diff engine comparing two object
//!   graphs in parallel under configurable matching policies, producing a
//!   tree of delta nodes traversed via [`DeltaVisitor`].
//!
//! # Examples
//!
//! ```
//! use rangedelta::{KeyType, ReadOnlyBinaryRangeTree};
//! use std::collections::BTreeMap;
//!
//! // A rate table keyed by the inclusive start of each band.
//! let rates: BTreeMap<u32, f64> = [(0, 1.0), (18, 0.8), (65, 1.2)].into();
//! let table = ReadOnlyBinaryRangeTree::new(rates, KeyType::LowerBoundEqual).unwrap();
//!
//! assert_eq!(table.get(&40), Some(&0.8));
//! assert_eq!(table.get(&70), Some(&1.2));
//! ```

mod child_deltas;
mod construction;
mod delta;
mod delta_options;
mod error;
mod iteration;
mod lookup;
mod multimap;
mod types;
mod validation;

pub use delta::{DeltaKind, DeltaVisitor, ModelObjectDelta};
pub use delta_options::{
    ComputationMethod, DeltaComputationOptions, DeltaSupport, SameInstanceOptions,
};
pub use error::{InitResult, RangeTreeError};
pub use iteration::{ItemIterator, KeyIterator, ValueIterator};
pub use multimap::MultiMap;
pub use types::{
    BalancedBinaryTree, KeyType, NodeId, ReadOnlyBinaryRangeTree, TwoColumnKey, NULL_NODE,
};
