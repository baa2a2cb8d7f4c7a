//! Indexed min-priority queue.
//!
//! A plain [`std::collections::BinaryHeap`] cannot change or remove an
//! arbitrary entry. This heap keeps a `key -> slot` index next to the slot
//! array so that every entry can be found, re-prioritised and removed in
//! `O(log n)`.

use ahash::AHashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
struct Entry<K, P> {
    key: K,
    priority: P,
}

/// Min-heap keyed by `K` and ordered by `P`.
///
/// Ties on priority are broken arbitrarily; callers only rely on the minimum
/// priority, never on which of several equal entries surfaces first.
#[derive(Debug, Clone)]
pub struct IndexedQueue<K, P> {
    heap: Vec<Entry<K, P>>,
    slots: AHashMap<K, usize>,
}

impl<K, P> Default for IndexedQueue<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P> IndexedQueue<K, P>
where
    K: Hash + Eq + Clone,
    P: Ord + Copy,
{
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: Vec::new(),
            slots: AHashMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            slots: AHashMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    pub fn priority(&self, key: &K) -> Option<P> {
        self.slots.get(key).map(|&slot| self.heap[slot].priority)
    }

    /// Insert `key`, or overwrite its priority if already queued.
    /// Returns the previous priority.
    pub fn push(&mut self, key: K, priority: P) -> Option<P> {
        if let Some(&slot) = self.slots.get(&key) {
            let old = self.heap[slot].priority;
            self.heap[slot].priority = priority;
            self.restore(slot);
            return Some(old);
        }

        let slot = self.heap.len();
        self.slots.insert(key.clone(), slot);
        self.heap.push(Entry { key, priority });
        self.sift_up(slot);
        None
    }

    /// Raise the priority of `key` only if `priority` is strictly greater
    /// than the queued one, inserting it when absent.
    /// Returns `true` if the queue changed.
    pub fn improve(&mut self, key: K, priority: P) -> bool {
        match self.slots.get(&key) {
            Some(&slot) if self.heap[slot].priority >= priority => false,
            Some(&slot) => {
                self.heap[slot].priority = priority;
                self.sift_down(slot);
                true
            }
            None => {
                self.push(key, priority);
                true
            }
        }
    }

    /// The entry with the smallest priority.
    #[inline]
    pub fn peek(&self) -> Option<(&K, P)> {
        self.heap.first().map(|e| (&e.key, e.priority))
    }

    pub fn pop(&mut self) -> Option<(K, P)> {
        if self.heap.is_empty() {
            return None;
        }
        Some(self.remove_slot(0))
    }

    pub fn remove(&mut self, key: &K) -> Option<P> {
        let slot = *self.slots.get(key)?;
        let (_, priority) = self.remove_slot(slot);
        Some(priority)
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
    }

    /// Queued entries in heap order (not sorted).
    pub fn iter(&self) -> impl Iterator<Item = (&K, P)> {
        self.heap.iter().map(|e| (&e.key, e.priority))
    }

    fn remove_slot(&mut self, slot: usize) -> (K, P) {
        let last = self.heap.len() - 1;
        self.swap(slot, last);

        let entry = match self.heap.pop() {
            Some(entry) => entry,
            None => unreachable!("remove_slot on empty heap"),
        };
        self.slots.remove(&entry.key);

        if slot < self.heap.len() {
            self.restore(slot);
        }
        (entry.key, entry.priority)
    }

    #[inline]
    fn restore(&mut self, slot: usize) {
        let slot = self.sift_up(slot);
        self.sift_down(slot);
    }

    fn sift_up(&mut self, mut slot: usize) -> usize {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.heap[slot].priority >= self.heap[parent].priority {
                break;
            }
            self.swap(slot, parent);
            slot = parent;
        }
        slot
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.heap[right].priority < self.heap[left].priority {
                right
            } else {
                left
            };
            if self.heap[child].priority >= self.heap[slot].priority {
                break;
            }
            self.swap(slot, child);
            slot = child;
        }
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        // Both keys are present in the index by construction.
        if let Some(s) = self.slots.get_mut(&self.heap[a].key) {
            *s = a;
        }
        if let Some(s) = self.slots.get_mut(&self.heap[b].key) {
            *s = b;
        }
    }

    #[cfg(test)]
    fn assert_heap(&self) {
        for slot in 1..self.heap.len() {
            let parent = (slot - 1) / 2;
            assert!(self.heap[parent].priority <= self.heap[slot].priority);
        }
        assert_eq!(self.slots.len(), self.heap.len());
        for (key, &slot) in &self.slots {
            assert!(self.heap[slot].key == *key);
        }
    }
}
