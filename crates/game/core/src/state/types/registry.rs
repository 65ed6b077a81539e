//! Ordered, id-indexed collections.
//!
//! Gems and enemies are addressed by id on every action but rendered in
//! insertion order. [`Registry`] keeps both views consistent and serializes as
//! a plain list so saves stay readable and repairable.
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Types that carry their own unique key.
pub trait Keyed {
    type Key: Clone + Eq + Hash + fmt::Debug;

    fn key(&self) -> &Self::Key;
}

/// Insertion-ordered collection with O(1) lookup by key.
///
/// Duplicate keys are rejected on construction: the first occurrence wins.
/// Callers holding `&mut T` must not change the key.
pub struct Registry<T: Keyed> {
    items: Vec<T>,
    index: HashMap<T::Key, usize>,
}

impl<T: Keyed> Registry<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.index.get(key).map(|&idx| &self.items[idx])
    }

    pub fn get_mut(&mut self, key: &T::Key) -> Option<&mut T> {
        match self.index.get(key) {
            Some(&idx) => self.items.get_mut(idx),
            None => None,
        }
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Appends `item`, or replaces the existing entry with the same key in place.
    ///
    /// Returns the replaced entry, if any.
    pub fn insert(&mut self, item: T) -> Option<T> {
        match self.index.get(item.key()) {
            Some(&idx) => Some(std::mem::replace(&mut self.items[idx], item)),
            None => {
                self.index.insert(item.key().clone(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    /// Appends `item` only if its key is not present yet.
    pub fn insert_new(&mut self, item: T) -> bool {
        if self.contains(item.key()) {
            return false;
        }
        self.insert(item);
        true
    }

    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let idx = self.index.remove(key)?;
        let removed = self.items.remove(idx);
        self.reindex();
        Some(removed)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let before = self.items.len();
        self.items.retain(|item| keep(item));
        if self.items.len() != before {
            self.reindex();
        }
    }

    /// Drops entries past `len`, keeping the oldest.
    pub fn truncate(&mut self, len: usize) {
        if self.items.len() > len {
            self.items.truncate(len);
            self.reindex();
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &T::Key> {
        self.items.iter().map(Keyed::key)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.key().clone(), idx))
            .collect();
    }
}

impl<T: Keyed> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed + Clone> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            index: self.index.clone(),
        }
    }
}

impl<T: Keyed + fmt::Debug> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<T: Keyed + PartialEq> PartialEq for Registry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Keyed> From<Vec<T>> for Registry<T> {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Keyed> FromIterator<T> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut registry = Self::new();
        for item in iter {
            registry.insert_new(item);
        }
        registry
    }
}

impl<'a, T: Keyed> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Keyed + Serialize> Serialize for Registry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de, T: Keyed + Deserialize<'de>> Deserialize<'de> for Registry<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Entry {
        id: u32,
        label: &'static str,
    }

    impl Keyed for Entry {
        type Key = u32;
        fn key(&self) -> &u32 {
            &self.id
        }
    }

    fn entry(id: u32, label: &'static str) -> Entry {
        Entry { id, label }
    }

    #[test]
    fn duplicate_keys_keep_first_occurrence() {
        let registry: Registry<Entry> = vec![entry(1, "a"), entry(2, "b"), entry(1, "c")].into();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&1).map(|e| e.label), Some("a"));
    }

    #[test]
    fn remove_keeps_index_consistent() {
        let mut registry: Registry<Entry> =
            vec![entry(1, "a"), entry(2, "b"), entry(3, "c")].into();
        assert_eq!(registry.remove(&1).map(|e| e.label), Some("a"));
        assert_eq!(registry.get(&3).map(|e| e.label), Some("c"));
        assert_eq!(registry.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert!(registry.remove(&9).is_none());
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut registry: Registry<Entry> = vec![entry(1, "a"), entry(2, "b")].into();
        let old = registry.insert(entry(1, "z"));
        assert_eq!(old.map(|e| e.label), Some("a"));
        assert_eq!(registry.as_slice()[0].label, "z");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn retain_and_truncate_reindex() {
        let mut registry: Registry<Entry> =
            vec![entry(1, "a"), entry(2, "b"), entry(3, "c"), entry(4, "d")].into();
        registry.retain(|e| e.id % 2 == 0);
        assert_eq!(registry.get(&4).map(|e| e.label), Some("d"));
        registry.truncate(1);
        assert!(registry.get(&4).is_none());
        assert!(registry.contains(&2));
    }
}
