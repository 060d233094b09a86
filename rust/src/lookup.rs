//! Read operations for the balanced tree and the range trees.
//!
//! All lookups are a single binary-search descent from the root, tracking the
//! best candidate seen so far on the correct side of the probe. A probe that
//! no key satisfies is a miss (`None`), never an error.

use std::cmp::Ordering;

use crate::types::{BalancedBinaryTree, KeyType, ReadOnlyBinaryRangeTree, TreeNode, NULL_NODE};

impl<K: Ord, V> BalancedBinaryTree<K, V> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Get a reference to the value associated with an exactly matching key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangedelta::BalancedBinaryTree;
    /// use std::collections::BTreeMap;
    ///
    /// let tree = BalancedBinaryTree::from_map(BTreeMap::from([(1, "one")]));
    /// assert_eq!(tree.get(&1), Some(&"one"));
    /// assert_eq!(tree.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut current = self.root;
        while current != NULL_NODE {
            let node = &self.nodes[current as usize];
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Check if a key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    // ============================================================================
    // DESCENT PRIMITIVES
    // ============================================================================

    /// Find the node with the greatest key ≤ `probe` (or < `probe` when
    /// `inclusive` is false), tracking the best candidate during descent.
    pub(crate) fn floor_node(&self, probe: &K, inclusive: bool) -> Option<&TreeNode<K, V>> {
        let mut best = NULL_NODE;
        let mut current = self.root;
        while current != NULL_NODE {
            let node = &self.nodes[current as usize];
            let qualifies = match node.key.cmp(probe) {
                Ordering::Less => true,
                Ordering::Equal => inclusive,
                Ordering::Greater => false,
            };
            if qualifies {
                // Everything further left is smaller; look right for a
                // candidate closer to the probe.
                best = current;
                current = node.right;
            } else {
                current = node.left;
            }
        }
        (best != NULL_NODE).then(|| &self.nodes[best as usize])
    }

    /// Find the node with the least key ≥ `probe` (or > `probe` when
    /// `inclusive` is false).
    pub(crate) fn ceiling_node(&self, probe: &K, inclusive: bool) -> Option<&TreeNode<K, V>> {
        let mut best = NULL_NODE;
        let mut current = self.root;
        while current != NULL_NODE {
            let node = &self.nodes[current as usize];
            let qualifies = match node.key.cmp(probe) {
                Ordering::Greater => true,
                Ordering::Equal => inclusive,
                Ordering::Less => false,
            };
            if qualifies {
                best = current;
                current = node.left;
            } else {
                current = node.right;
            }
        }
        (best != NULL_NODE).then(|| &self.nodes[best as usize])
    }
}

impl<K: Ord, V> ReadOnlyBinaryRangeTree<K, V> {
    /// Look up the value that applies to `probe` under this tree's
    /// [`KeyType`].
    ///
    /// A probe outside all bounds, or falling into a gap between two-column
    /// intervals, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangedelta::{KeyType, ReadOnlyBinaryRangeTree};
    /// use std::collections::BTreeMap;
    ///
    /// let entries: BTreeMap<i32, i32> = (1..=10).map(|i| (i * 10, i)).collect();
    ///
    /// let tree = ReadOnlyBinaryRangeTree::new(entries.clone(), KeyType::LowerBoundEqual).unwrap();
    /// assert_eq!(tree.get(&35), Some(&3));
    /// assert_eq!(tree.get(&10), Some(&1));
    /// assert_eq!(tree.get(&5), None);
    ///
    /// let tree = ReadOnlyBinaryRangeTree::new(entries, KeyType::UpperBoundEqual).unwrap();
    /// assert_eq!(tree.get(&26), Some(&3));
    /// assert_eq!(tree.get(&101), None);
    /// ```
    pub fn get(&self, probe: &K) -> Option<&V> {
        let node = match self.key_type {
            KeyType::LowerBound => self.tree.floor_node(probe, false),
            KeyType::LowerBoundEqual => self.tree.floor_node(probe, true),
            KeyType::UpperBound => self.tree.ceiling_node(probe, false),
            KeyType::UpperBoundEqual => self.tree.ceiling_node(probe, true),
            KeyType::TwoColumn => self
                .tree
                .floor_node(probe, true)
                .filter(|node| match node.value.upper_bound.as_ref() {
                    Some(upper) => probe <= upper,
                    None => false,
                }),
        }?;
        Some(&node.value.value)
    }
}
