//! Vertex accounting for the average degree.
//!
//! The vertex set is never stored directly: a node is a vertex exactly while
//! at least one retained edge touches it. [`VertexDegrees`] tracks that
//! incrementally, [`count_vertices`] recomputes it from scratch.

use ahash::{AHashMap, AHashSet};

use crate::graph::{EdgeKey, NodeId};

/// Degree of every node touched by at least one retained edge.
#[derive(Debug, Clone, Default)]
pub struct VertexDegrees {
    degrees: AHashMap<NodeId, usize>,
}

impl VertexDegrees {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, key: &EdgeKey) {
        for node in key.endpoints() {
            *self.degrees.entry(node).or_insert(0) += 1;
        }
    }

    /// Returns `false` if either endpoint was not tracked.
    pub fn remove_edge(&mut self, key: &EdgeKey) -> bool {
        let mut consistent = true;
        for node in key.endpoints() {
            match self.degrees.get_mut(&node) {
                Some(degree) if *degree > 1 => *degree -= 1,
                Some(_) => {
                    self.degrees.remove(&node);
                }
                None => consistent = false,
            }
        }
        consistent
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.degrees.len()
    }

    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        self.degrees.get(&node).copied().unwrap_or(0)
    }

    /// Sum of all degrees; always twice the edge count.
    pub fn total_degree(&self) -> usize {
        self.degrees.values().sum()
    }
}

/// Number of distinct endpoints across `edges`.
pub fn count_vertices<'a, I>(edges: I) -> usize
where
    I: IntoIterator<Item = &'a EdgeKey>,
{
    edges
        .into_iter()
        .flat_map(|key| key.endpoints())
        .collect::<AHashSet<NodeId>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(a: NodeId, b: NodeId) -> EdgeKey {
        EdgeKey::new(a, b).unwrap()
    }

    #[test]
    fn test_degrees_track_edges() {
        let mut degrees = VertexDegrees::new();
        degrees.add_edge(&key(1, 2));
        degrees.add_edge(&key(2, 3));
        assert_eq!(degrees.vertex_count(), 3);
        assert_eq!(degrees.degree(2), 2);
        assert_eq!(degrees.total_degree(), 4);

        assert!(degrees.remove_edge(&key(1, 2)));
        assert_eq!(degrees.vertex_count(), 2);
        assert_eq!(degrees.degree(1), 0);
        assert_eq!(degrees.degree(2), 1);

        assert!(degrees.remove_edge(&key(2, 3)));
        assert_eq!(degrees.vertex_count(), 0);
    }

    #[test]
    fn test_remove_untracked_edge_is_reported() {
        let mut degrees = VertexDegrees::new();
        assert!(!degrees.remove_edge(&key(5, 6)));
        assert_eq!(degrees.vertex_count(), 0);
    }

    #[test]
    fn test_count_vertices() {
        let edges = [key(1, 2), key(1, 3), key(2, 3), key(4, 5)];
        assert_eq!(count_vertices(&edges), 5);
        assert_eq!(count_vertices(&[]), 0);
    }
}
