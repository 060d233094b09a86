//! Iterator implementations for [`BalancedBinaryTree`].
//!
//! Node IDs are assigned in ascending key order at construction time, so the
//! in-order traversal is a linear scan over the arena; no descent or explicit
//! stack is needed.

use crate::types::{BalancedBinaryTree, TreeNode};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in ascending key order.
pub struct ItemIterator<'a, K, V> {
    nodes: std::slice::Iter<'a, TreeNode<K, V>>,
}

/// Iterator over keys in ascending order.
pub struct KeyIterator<'a, K, V> {
    items: ItemIterator<'a, K, V>,
}

/// Iterator over values in key order.
pub struct ValueIterator<'a, K, V> {
    items: ItemIterator<'a, K, V>,
}

// ============================================================================
// TREE ITERATOR METHODS
// ============================================================================

impl<K, V> BalancedBinaryTree<K, V> {
    /// Returns an iterator over all key-value pairs in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangedelta::BalancedBinaryTree;
    /// use std::collections::BTreeMap;
    ///
    /// let tree = BalancedBinaryTree::from_map(BTreeMap::from([(2, "b"), (1, "a")]));
    /// let items: Vec<_> = tree.items().collect();
    /// assert_eq!(items, [(&1, &"a"), (&2, &"b")]);
    /// ```
    pub fn items(&self) -> ItemIterator<'_, K, V> {
        ItemIterator {
            nodes: self.nodes.iter(),
        }
    }

    /// Returns an iterator over all keys in sorted order.
    pub fn keys(&self) -> KeyIterator<'_, K, V> {
        KeyIterator { items: self.items() }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> ValueIterator<'_, K, V> {
        ValueIterator { items: self.items() }
    }
}

// ============================================================================
// ITERATOR IMPLEMENTATIONS
// ============================================================================

impl<'a, K, V> Iterator for ItemIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.nodes.next().map(|node| (&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<'a, K, V> Iterator for KeyIterator<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl<'a, K, V> Iterator for ValueIterator<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}
