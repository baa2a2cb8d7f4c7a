use ahash::AHashMap;

use crate::graph::{EdgeKey, Timestamp};

/// Last-seen timestamp of every retained edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeStore {
    edges: AHashMap<EdgeKey, Timestamp>,
}

impl EdgeStore {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: &EdgeKey) -> Option<Timestamp> {
        self.edges.get(key).copied()
    }

    #[inline]
    pub fn contains(&self, key: &EdgeKey) -> bool {
        self.edges.contains_key(key)
    }

    /// Returns the previous timestamp, if any.
    #[inline]
    pub fn insert(&mut self, key: EdgeKey, timestamp: Timestamp) -> Option<Timestamp> {
        self.edges.insert(key, timestamp)
    }

    #[inline]
    pub fn remove(&mut self, key: &EdgeKey) -> Option<Timestamp> {
        self.edges.remove(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EdgeKey, Timestamp)> {
        self.edges.iter().map(|(k, &t)| (k, t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut store = EdgeStore::new();
        let key = EdgeKey::new(1, 2).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.insert(key, 10), None);
        assert_eq!(store.insert(key, 12), Some(10));
        assert_eq!(store.get(&EdgeKey::new(2, 1).unwrap()), Some(12));
        assert_eq!(store.len(), 1);

        assert_eq!(store.remove(&key), Some(12));
        assert!(!store.contains(&key));
    }
}
