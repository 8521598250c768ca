//! Insertion-ordered map used for oldest-fill eviction.
//!
//! Keys are kept in a `VecDeque` in fill order next to a `HashMap` lookup
//! table, giving O(1) lookup and O(1) removal of the oldest entry.
//!
//! Overwriting an existing key replaces its value but keeps its original
//! position in the fill order.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

/// Map that remembers the order in which keys were first filled.
#[derive(Debug, Clone)]
pub(crate) struct FillOrder<K, V> {
    order: VecDeque<K>,
    entries: HashMap<K, V>,
}

impl<K: Copy + Eq + Hash, V> FillOrder<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            order: VecDeque::new(),
            entries: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites `key`. A new key becomes the youngest entry.
    pub(crate) fn insert(&mut self, key: K, value: V) {
        if self.entries.insert(key, value).is_none() {
            self.order.push_back(key);
        }
    }

    /// Removes and returns the oldest entry.
    pub(crate) fn pop_oldest(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_front()?;
        self.entries.remove(&key).map(|value| (key, value))
    }

    /// Values in arbitrary order.
    pub(crate) fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    /// Entries oldest-first.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|value| (*key, value)))
    }
}
