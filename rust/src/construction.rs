//! Construction logic for the balanced tree and the range trees.
//!
//! Trees are built once from a complete, pre-sorted key set; there is no
//! incremental rebalancing. Everything that can be wrong with the input
//! (key-shape mismatch, inverted or overlapping intervals) is rejected here,
//! never deferred to the first lookup.

use std::collections::BTreeMap;

use crate::error::{InitResult, RangeTreeError};
use crate::types::{
    BalancedBinaryTree, KeyType, NodeId, RangeEntry, ReadOnlyBinaryRangeTree, TreeNode,
    TwoColumnKey, NULL_NODE,
};

impl<K: Ord, V> BalancedBinaryTree<K, V> {
    /// Build a minimal-height binary search tree from a key→value mapping.
    ///
    /// The map is already sorted and de-duplicated, so construction is a
    /// single pass: every entry becomes an arena node (node ID == sorted
    /// position) and the sub-range midpoints are linked recursively.
    ///
    /// An empty map yields a tree with no root; a single entry yields a root
    /// without children.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangedelta::BalancedBinaryTree;
    /// use std::collections::BTreeMap;
    ///
    /// let tree = BalancedBinaryTree::from_map(BTreeMap::from([(10, "a"), (20, "b")]));
    /// assert_eq!(tree.len(), 2);
    ///
    /// let empty = BalancedBinaryTree::<i32, &str>::from_map(BTreeMap::new());
    /// assert!(empty.is_empty());
    /// ```
    pub fn from_map(entries: BTreeMap<K, V>) -> Self {
        Self::from_sorted(entries.into_iter().collect())
    }
}

impl<K, V> BalancedBinaryTree<K, V> {
    /// Build from entries already in ascending key order with no duplicates.
    pub(crate) fn from_sorted(entries: Vec<(K, V)>) -> Self {
        let mut nodes: Vec<TreeNode<K, V>> = entries
            .into_iter()
            .map(|(key, value)| TreeNode {
                key,
                value,
                left: NULL_NODE,
                right: NULL_NODE,
            })
            .collect();

        let count = nodes.len();
        let root = link_subtree(&mut nodes, 0, count);

        Self { nodes, root }
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of levels in the tree (0 for an empty tree).
    ///
    /// Construction guarantees this is ⌈log2(n+1)⌉ for n keys.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, node: NodeId) -> usize {
        if node == NULL_NODE {
            return 0;
        }
        let node = &self.nodes[node as usize];
        1 + self
            .subtree_height(node.left)
            .max(self.subtree_height(node.right))
    }
}

/// Link the nodes of `nodes[start .. start + count]` into a minimal-height
/// subtree and return its root.
///
/// The midpoint is `start + count / 2`: with an even count the root is the
/// greater of the two middle candidates, so for the key set {0, 1} the root
/// is 1, and for {0, 1, 2} the root is 1.
fn link_subtree<K, V>(nodes: &mut [TreeNode<K, V>], start: usize, count: usize) -> NodeId {
    if count == 0 {
        return NULL_NODE;
    }

    let mid = start + count / 2;
    let left = link_subtree(nodes, start, mid - start);
    let right = link_subtree(nodes, mid + 1, start + count - mid - 1);

    nodes[mid].left = left;
    nodes[mid].right = right;
    mid as NodeId
}

impl<K: Ord, V> ReadOnlyBinaryRangeTree<K, V> {
    /// Create a range tree over single-bound keys.
    ///
    /// # Errors
    ///
    /// Returns [`RangeTreeError::KeyShapeMismatch`] for
    /// [`KeyType::TwoColumn`], which requires interval keys; use
    /// [`ReadOnlyBinaryRangeTree::with_two_column_keys`] instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangedelta::{KeyType, ReadOnlyBinaryRangeTree};
    /// use std::collections::BTreeMap;
    ///
    /// let entries = BTreeMap::from([(10, "low"), (20, "high")]);
    /// let tree = ReadOnlyBinaryRangeTree::new(entries, KeyType::LowerBoundEqual).unwrap();
    /// assert_eq!(tree.get(&15), Some(&"low"));
    /// ```
    pub fn new(entries: BTreeMap<K, V>, key_type: KeyType) -> InitResult<Self> {
        if key_type == KeyType::TwoColumn {
            return Err(RangeTreeError::key_shape_mismatch(
                key_type,
                "two-column interval",
            ));
        }

        let entries = entries
            .into_iter()
            .map(|(key, value)| {
                (
                    key,
                    RangeEntry {
                        upper_bound: None,
                        value,
                    },
                )
            })
            .collect();

        Ok(Self {
            tree: BalancedBinaryTree::from_sorted(entries),
            key_type,
        })
    }

    /// Create a two-column range tree over closed, non-overlapping intervals.
    ///
    /// The intervals are sorted by lower bound (the tree's sort key) and
    /// validated: an interval whose lower bound exceeds its upper bound is
    /// rejected, as is any pair of overlapping intervals. Gaps between
    /// intervals are allowed; probes falling into a gap simply miss.
    ///
    /// # Errors
    ///
    /// Returns [`RangeTreeError::InvalidInterval`] or
    /// [`RangeTreeError::OverlappingIntervals`]; the messages refer to
    /// interval positions in lower-bound order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangedelta::{ReadOnlyBinaryRangeTree, TwoColumnKey};
    /// use std::collections::BTreeMap;
    ///
    /// let entries = BTreeMap::from([
    ///     (TwoColumnKey::new(0, 2), "first"),
    ///     (TwoColumnKey::new(4, 6), "second"),
    /// ]);
    /// let tree = ReadOnlyBinaryRangeTree::with_two_column_keys(entries).unwrap();
    ///
    /// assert_eq!(tree.get(&1), Some(&"first"));
    /// assert_eq!(tree.get(&3), None); // gap
    /// ```
    pub fn with_two_column_keys(entries: BTreeMap<TwoColumnKey<K>, V>) -> InitResult<Self> {
        let mut sorted: Vec<(K, RangeEntry<K, V>)> = Vec::with_capacity(entries.len());

        for (position, (key, value)) in entries.into_iter().enumerate() {
            let (lower, upper) = key.into_bounds();
            if lower > upper {
                return Err(RangeTreeError::invalid_interval(position));
            }
            if let Some((_, previous)) = sorted.last() {
                // The previous upper bound must stay below this lower bound;
                // intervals are closed on both ends.
                let previous_upper = previous
                    .upper_bound
                    .as_ref()
                    .ok_or_else(|| RangeTreeError::data_integrity(
                        "two-column construction",
                        "entry without upper bound",
                    ))?;
                if *previous_upper >= lower {
                    return Err(RangeTreeError::overlapping_intervals(position - 1, position));
                }
            }
            sorted.push((
                lower,
                RangeEntry {
                    upper_bound: Some(upper),
                    value,
                },
            ));
        }

        Ok(Self {
            tree: BalancedBinaryTree::from_sorted(sorted),
            key_type: KeyType::TwoColumn,
        })
    }
}
