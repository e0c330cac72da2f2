//! Attribute storage for nodes, hyperedges, and the hypergraph itself.
//!
//! Attribute values are arbitrary JSON data ([`serde_json::Value`]), held in
//! insertion-ordered maps so iteration and serialization are deterministic.

use std::hash::Hash;

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};

/// Insertion-ordered map with a fast non-cryptographic hasher.
pub type AIndexMap<K, V> = IndexMap<K, V, RandomState>;

/// Insertion-ordered set with a fast non-cryptographic hasher.
pub type AIndexSet<T> = IndexSet<T, RandomState>;

/// One attribute map: string keys to arbitrary JSON values.
pub type Attrs = AIndexMap<String, serde_json::Value>;

/// Keyed collection of attribute maps, one per node or hyperedge.
///
/// Entries keep insertion order. Duplication is plain [`Clone`]: every map is
/// copied, so mutating a clone is never observable in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrStore<K: Hash + Eq> {
    entries: AIndexMap<K, Attrs>,
}

impl<K: Hash + Eq> Default for AttrStore<K> {
    fn default() -> Self {
        AttrStore {
            entries: AIndexMap::default(),
        }
    }
}

impl<K: Hash + Eq> AttrStore<K> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keyed entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Borrows the attribute map for `key`, if present.
    pub fn get(&self, key: &K) -> Option<&Attrs> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut Attrs> {
        self.entries.get_mut(key)
    }

    /// Ensures an entry for `key` exists and borrows it mutably.
    pub fn entry(&mut self, key: K) -> &mut Attrs {
        self.entries.entry(key).or_default()
    }

    /// Replaces the attribute map for `key`.
    pub fn set(&mut self, key: K, attrs: Attrs) {
        self.entries.insert(key, attrs);
    }

    /// Overlays `attrs` onto the entry for `key`, creating it if absent.
    /// Keys present in both take the incoming value.
    pub fn merge(&mut self, key: K, attrs: Attrs) {
        self.entries.entry(key).or_default().extend(attrs);
    }

    /// Removes the entry for `key`, preserving the order of the rest.
    pub fn remove(&mut self, key: &K) -> Option<Attrs> {
        self.entries.shift_remove(key)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Attrs)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
