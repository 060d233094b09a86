//! Core types and data structures for the balanced range trees.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants shared by the tree construction, lookup, iteration, and
//! validation modules.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation
pub type NodeId = u32;

/// Sentinel ID marking an absent child or an absent root.
pub const NULL_NODE: NodeId = u32::MAX;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A single tree node stored in the arena.
///
/// Children are referenced by arena ID rather than owned pointers; `NULL_NODE`
/// marks a missing child. Node IDs are assigned in ascending key order, so an
/// in-order traversal of the tree visits the arena front to back.
#[derive(Debug, Clone)]
pub(crate) struct TreeNode<K, V> {
    /// The node's key. All keys in the left subtree compare less, all keys
    /// in the right subtree compare greater.
    pub(crate) key: K,
    /// The value associated with the key.
    pub(crate) value: V,
    /// Left child, or `NULL_NODE`.
    pub(crate) left: NodeId,
    /// Right child, or `NULL_NODE`.
    pub(crate) right: NodeId,
}

/// An immutable, minimal-height binary search tree.
///
/// The tree is built once from a complete key set and never rebalanced:
/// keys are sorted ascending and the middle element of each sub-range becomes
/// the subtree root, which bounds the depth at ⌈log2(n+1)⌉ for n keys.
/// Lookups are O(log n); there is no insertion or removal.
///
/// # Examples
///
/// ```
/// use rangedelta::BalancedBinaryTree;
/// use std::collections::BTreeMap;
///
/// let entries: BTreeMap<i32, &str> = [(1, "one"), (2, "two"), (3, "three")].into();
/// let tree = BalancedBinaryTree::from_map(entries);
///
/// assert_eq!(tree.get(&2), Some(&"two"));
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.height(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct BalancedBinaryTree<K, V> {
    /// Arena storage for all nodes, in ascending key order.
    pub(crate) nodes: Vec<TreeNode<K, V>>,
    /// The root node, or `NULL_NODE` for an empty tree.
    pub(crate) root: NodeId,
}

/// Lookup mode of a [`ReadOnlyBinaryRangeTree`], fixed at construction time.
///
/// The key type decides how a probe value is matched against the stored
/// boundary keys (or intervals) during a lookup; see the variant docs for the
/// exact rule applied to a probe `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Keys are exclusive lower bounds: the lookup returns the value of the
    /// greatest key strictly less than `p`.
    LowerBound,
    /// Keys are inclusive lower bounds: the lookup returns the value of the
    /// greatest key less than or equal to `p`.
    LowerBoundEqual,
    /// Keys are exclusive upper bounds: the lookup returns the value of the
    /// least key strictly greater than `p`.
    UpperBound,
    /// Keys are inclusive upper bounds: the lookup returns the value of the
    /// least key greater than or equal to `p`.
    UpperBoundEqual,
    /// Keys are closed intervals `[lower, upper]`: the lookup returns the
    /// value of the interval containing `p`.
    TwoColumn,
}

/// An immutable closed interval `[lower_bound, upper_bound]` used as the key
/// of a two-column range tree.
///
/// Ordering, equality, and hashing are defined by the lower bound alone;
/// the upper bound is consulted at lookup time to test interval membership.
#[derive(Debug, Clone, Copy)]
pub struct TwoColumnKey<K> {
    lower_bound: K,
    upper_bound: K,
}

impl<K> TwoColumnKey<K> {
    /// Creates the closed interval `[lower_bound, upper_bound]`.
    pub fn new(lower_bound: K, upper_bound: K) -> Self {
        Self {
            lower_bound,
            upper_bound,
        }
    }

    /// The inclusive lower end of the interval.
    pub fn lower_bound(&self) -> &K {
        &self.lower_bound
    }

    /// The inclusive upper end of the interval.
    pub fn upper_bound(&self) -> &K {
        &self.upper_bound
    }

    pub(crate) fn into_bounds(self) -> (K, K) {
        (self.lower_bound, self.upper_bound)
    }
}

impl<K: Ord> TwoColumnKey<K> {
    /// Returns true if `probe` lies within the closed interval.
    pub fn contains(&self, probe: &K) -> bool {
        *probe >= self.lower_bound && *probe <= self.upper_bound
    }
}

impl<K: Ord> PartialEq for TwoColumnKey<K> {
    fn eq(&self, other: &Self) -> bool {
        self.lower_bound == other.lower_bound
    }
}

impl<K: Ord> Eq for TwoColumnKey<K> {}

impl<K: Ord> PartialOrd for TwoColumnKey<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for TwoColumnKey<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.lower_bound.cmp(&other.lower_bound)
    }
}

impl<K: Hash> Hash for TwoColumnKey<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.lower_bound.hash(state);
    }
}

/// Per-node payload of a range tree: the value plus, in two-column mode,
/// the inclusive upper bound of the node's interval.
#[derive(Debug, Clone)]
pub(crate) struct RangeEntry<K, V> {
    /// Upper bound of the interval; `None` for single-bound key types.
    pub(crate) upper_bound: Option<K>,
    pub(crate) value: V,
}

/// A read-only balanced search tree answering range queries against a fixed,
/// pre-loaded dataset.
///
/// Keys represent boundaries or intervals rather than exact match points;
/// the classic use case is a tariff or rate table keyed by effective ranges
/// (age bands, zip-code ranges). The lookup rule is selected once, at
/// construction time, via [`KeyType`].
///
/// The tree is immutable after construction and therefore safe to share
/// across threads for concurrent read-only lookups.
///
/// # Examples
///
/// ```
/// use rangedelta::{KeyType, ReadOnlyBinaryRangeTree};
/// use std::collections::BTreeMap;
///
/// // Age bands starting at 18, 30, and 65.
/// let bands: BTreeMap<u32, &str> = [(18, "adult"), (30, "middle"), (65, "senior")].into();
/// let tree = ReadOnlyBinaryRangeTree::new(bands, KeyType::LowerBoundEqual).unwrap();
///
/// assert_eq!(tree.get(&45), Some(&"middle"));
/// assert_eq!(tree.get(&65), Some(&"senior"));
/// assert_eq!(tree.get(&17), None);
/// ```
#[derive(Debug, Clone)]
pub struct ReadOnlyBinaryRangeTree<K, V> {
    /// The underlying balanced tree, keyed by the derived sort key
    /// (for two-column keys: the lower bound).
    pub(crate) tree: BalancedBinaryTree<K, RangeEntry<K, V>>,
    /// Lookup mode, fixed for the lifetime of the tree.
    pub(crate) key_type: KeyType,
}

impl<K, V> ReadOnlyBinaryRangeTree<K, V> {
    /// The lookup mode this tree was constructed with.
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Returns the number of keys (or intervals) in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
