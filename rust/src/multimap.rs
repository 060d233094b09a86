//! A mapping from key to a set of values.
//!
//! Used as a building block for indices over object collections where several
//! values legitimately share a key (e.g. all coverages of one product line).

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// A key → set-of-values index with set semantics per key.
///
/// `put` is idempotent: storing the same value twice under one key leaves a
/// single occurrence. `get` never fails; a missing key yields a read-only
/// view of one shared empty set owned by the map, so the returned reference
/// is identity-stable across calls.
///
/// Not synchronized; callers mutating from several threads must add external
/// locking.
///
/// # Examples
///
/// ```
/// use rangedelta::MultiMap;
///
/// let mut index: MultiMap<&str, u32> = MultiMap::new();
/// index.put("motor", 100);
/// index.put("motor", 200);
/// index.put("motor", 100); // idempotent
///
/// assert_eq!(index.get(&"motor").len(), 2);
/// assert!(index.get(&"household").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiMap<K, V> {
    entries: HashMap<K, HashSet<V>>,
    /// Returned by `get` for keys without an entry.
    empty: HashSet<V>,
}

impl<K: Eq + Hash, V: Eq + Hash> MultiMap<K, V> {
    /// Creates an empty multi-map.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            empty: HashSet::new(),
        }
    }

    /// Adds `value` to the set stored under `key`, creating the set lazily
    /// on first use. A value already present under the key is a no-op.
    pub fn put(&mut self, key: K, value: V) {
        self.entries.entry(key).or_default().insert(value);
    }

    /// Returns the set of values associated with `key`.
    ///
    /// The view is read-only and reflects the map's contents at call time;
    /// a missing key returns an empty set, never an error.
    pub fn get(&self, key: &K) -> &HashSet<V> {
        self.entries.get(key).unwrap_or(&self.empty)
    }

    /// Returns true if `value` is stored under `key`.
    pub fn contains(&self, key: &K, value: &V) -> bool {
        self.get(key).contains(value)
    }

    /// Returns the number of keys with at least one value.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no key has a value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry. This is the only removal operation; single
    /// values cannot be taken back out.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
