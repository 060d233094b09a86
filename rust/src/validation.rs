//! Validation and debugging utilities for the balanced trees.
//!
//! Construction establishes every invariant checked here; the checks exist
//! for tests and for callers that want to assert integrity after sharing a
//! tree across threads.

use crate::error::{RangeTreeError, TreeResult};
use crate::types::{BalancedBinaryTree, KeyType, NodeId, ReadOnlyBinaryRangeTree, NULL_NODE};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K: Ord, V> BalancedBinaryTree<K, V> {
    /// Check if the tree maintains its structural invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting: BST key ordering,
    /// link consistency (every arena node reachable exactly once), and
    /// minimal height.
    pub fn check_invariants_detailed(&self) -> Result<(), RangeTreeError> {
        if self.root == NULL_NODE {
            if !self.nodes.is_empty() {
                return Err(RangeTreeError::data_integrity(
                    "link consistency",
                    "tree has nodes but no root",
                ));
            }
            return Ok(());
        }

        // Arena order is key order, so sortedness and BST ordering coincide.
        for window in self.nodes.windows(2) {
            if window[0].key >= window[1].key {
                return Err(RangeTreeError::data_integrity(
                    "key ordering",
                    "arena keys are not strictly ascending",
                ));
            }
        }

        let mut visited = 0usize;
        self.check_subtree(self.root, None, None, &mut visited)?;
        if visited != self.nodes.len() {
            return Err(RangeTreeError::data_integrity(
                "link consistency",
                &format!(
                    "{} nodes reachable from root vs {} in arena",
                    visited,
                    self.nodes.len()
                ),
            ));
        }

        let minimal = usize::BITS as usize - self.nodes.len().leading_zeros() as usize;
        if self.height() != minimal {
            return Err(RangeTreeError::data_integrity(
                "balance",
                &format!("height {} vs minimal {}", self.height(), minimal),
            ));
        }

        Ok(())
    }

    /// Walk a subtree checking that child IDs stay inside the `(low, high)`
    /// ID window; IDs are assigned in key order, so this is the BST property.
    fn check_subtree(
        &self,
        node: NodeId,
        low: Option<NodeId>,
        high: Option<NodeId>,
        visited: &mut usize,
    ) -> TreeResult<()> {
        if node == NULL_NODE {
            return Ok(());
        }
        if node as usize >= self.nodes.len() {
            return Err(RangeTreeError::data_integrity(
                "link consistency",
                &format!("node id {} out of arena bounds", node),
            ));
        }
        if low.is_some_and(|low| node <= low) || high.is_some_and(|high| node >= high) {
            return Err(RangeTreeError::data_integrity(
                "key ordering",
                &format!("node id {} outside its subtree window", node),
            ));
        }
        *visited += 1;

        let entry = &self.nodes[node as usize];
        self.check_subtree(entry.left, low, Some(node), visited)?;
        self.check_subtree(entry.right, Some(node), high, visited)
    }
}

impl<K: Ord, V> ReadOnlyBinaryRangeTree<K, V> {
    /// Check the underlying tree plus the range-specific invariants:
    /// two-column entries carry disjoint closed intervals, single-bound
    /// entries carry no upper bound.
    pub fn check_invariants_detailed(&self) -> Result<(), RangeTreeError> {
        self.tree.check_invariants_detailed()?;

        match self.key_type {
            KeyType::TwoColumn => {
                let mut previous_upper: Option<&K> = None;
                for (position, (lower, entry)) in self.tree.items().enumerate() {
                    let upper = entry.upper_bound.as_ref().ok_or_else(|| {
                        RangeTreeError::data_integrity(
                            "two-column entries",
                            "entry without upper bound",
                        )
                    })?;
                    if upper < lower {
                        return Err(RangeTreeError::invalid_interval(position));
                    }
                    if previous_upper.is_some_and(|previous| previous >= lower) {
                        return Err(RangeTreeError::overlapping_intervals(
                            position - 1,
                            position,
                        ));
                    }
                    previous_upper = Some(upper);
                }
            }
            _ => {
                if self.tree.values().any(|entry| entry.upper_bound.is_some()) {
                    return Err(RangeTreeError::data_integrity(
                        "single-bound entries",
                        "entry carries an upper bound",
                    ));
                }
            }
        }

        Ok(())
    }

    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }
}
