use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::hash::HashMap;

// -----------------------------------------------------------------------------
// OrderedMap

/// A string-keyed map that iterates in insertion order.
///
/// Entries live in a `Vec`, a side index maps each key to its position.
/// Overwriting an existing key keeps its original position.
///
/// Equality ignores order: two maps are equal when they hold the same
/// keys with equal values.
///
/// # Examples
///
/// ```
/// use recast_utils::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("b", 1);
/// map.insert("a", 2);
/// map.insert("b", 3);
///
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["b", "a"]);
/// assert_eq!(map.get("b"), Some(&3));
/// ```
#[derive(Clone)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    indices: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedMap<V> {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashMap::default(),
        }
    }

    /// Creates an empty map with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Inserts a value, returning the previous value of the key.
    ///
    /// A new key is appended at the end; an existing key is updated in place.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key: String = key.into();
        if let Some(&index) = self.indices.get(key.as_str()) {
            return Some(core::mem::replace(&mut self.entries[index].1, value));
        }
        self.indices.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Removes a key, shifting the following entries down by one.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.indices.remove(key)?;
        let (_, value) = self.entries.remove(index);
        for (position, (name, _)) in self.entries.iter().enumerate().skip(index) {
            if let Some(slot) = self.indices.get_mut(name.as_str()) {
                *slot = position;
            }
        }
        Some(value)
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.indices.get(key).map(|&index| &self.entries[index].1)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = *self.indices.get(key)?;
        Some(&mut self.entries[index].1)
    }

    /// Returns the entry at `index` in insertion order.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&str, &V)> {
        self.entries
            .get(index)
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the position of `key` in insertion order.
    #[inline]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.indices.get(key).copied()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.indices.contains_key(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries in insertion order.
    #[inline]
    pub fn iter(&self) -> OrderedMapIter<'_, V> {
        OrderedMapIter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Returns an iterator over the values in insertion order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: fmt::Debug> fmt::Debug for OrderedMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for OrderedMap<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = alloc::vec::IntoIter<(String, V)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = OrderedMapIter<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// Iterator

/// An iterator over the entries of an [`OrderedMap`], in insertion order.
pub struct OrderedMapIter<'a, V> {
    inner: core::slice::Iter<'a, (String, V)>,
}

impl<'a, V> Iterator for OrderedMapIter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for OrderedMapIter<'_, V> {}

impl<V> DoubleEndedIterator for OrderedMapIter<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key.as_str(), value))
    }
}
