use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::degree::{count_vertices, VertexDegrees};
use crate::graph::{EdgeKey, NodeId, Record, Timestamp};
use crate::queue::IndexedQueue;
use crate::store::EdgeStore;
use crate::{Error, Result};

/// Default trailing window, in timestamp units (seconds).
pub const DEFAULT_WINDOW: Timestamp = 60;

/// Configuration for a windowed graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub window: Timestamp,
    pub initial_latest: Timestamp,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            initial_latest: 0,
        }
    }
}

impl ProcessorConfig {
    pub fn with_window(window: Timestamp) -> Self {
        Self {
            window,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.window < 0 {
            return Err(Error::InvalidConfig(format!(
                "window must be non-negative, got {}",
                self.window
            )));
        }
        Ok(())
    }
}

/// Counters describing a graph at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphStats {
    pub latest: Timestamp,
    pub edges: usize,
    pub vertices: usize,
    pub accepted: u64,
    pub discarded: u64,
    pub evicted: u64,
    pub average_degree: f64,
}

/// Hashtag graph restricted to a trailing time window.
///
/// Every retained edge satisfies `latest - last_seen <= window`, where
/// `latest` is the largest timestamp of any accepted record.
#[derive(Debug, Clone)]
pub struct WindowedGraph {
    config: ProcessorConfig,
    latest: Timestamp,
    edges: EdgeStore,
    queue: IndexedQueue<EdgeKey, Timestamp>,
    degrees: VertexDegrees,
    accepted: u64,
    discarded: u64,
    evicted: u64,
}

impl Default for WindowedGraph {
    fn default() -> Self {
        Self {
            config: ProcessorConfig::default(),
            latest: 0,
            edges: EdgeStore::new(),
            queue: IndexedQueue::new(),
            degrees: VertexDegrees::new(),
            accepted: 0,
            discarded: 0,
            evicted: 0,
        }
    }
}

impl WindowedGraph {
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            latest: config.initial_latest,
            ..Self::default()
        })
    }

    #[inline]
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    #[inline]
    pub fn window(&self) -> Timestamp {
        self.config.window
    }

    #[inline]
    pub fn latest(&self) -> Timestamp {
        self.latest
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.degrees.vertex_count()
    }

    pub fn edge_timestamp(&self, a: NodeId, b: NodeId) -> Option<Timestamp> {
        EdgeKey::new(a, b).and_then(|key| self.edges.get(&key))
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.degrees.degree(node)
    }

    pub fn edges(&self) -> impl Iterator<Item = (&EdgeKey, Timestamp)> {
        self.edges.iter()
    }

    /// `true` if `timestamp` is too old relative to `latest` to be kept.
    #[inline]
    fn expired(&self, timestamp: Timestamp) -> bool {
        self.latest.saturating_sub(timestamp) > self.config.window
    }

    /// Feed one record and return the average degree afterwards, or `None`
    /// if the record fell behind the window and was discarded untouched.
    pub fn process(&mut self, record: &Record) -> Option<f64> {
        let timestamp = record.timestamp();
        if self.expired(timestamp) {
            self.discarded += 1;
            debug!(
                timestamp,
                latest = self.latest,
                window = self.config.window,
                "discarding stale record"
            );
            return None;
        }

        self.accepted += 1;
        self.latest = self.latest.max(timestamp);

        // Evict before inserting so this record's own edges are never evicted.
        self.evict();

        for key in record.pairs() {
            self.refresh(key, timestamp);
        }

        Some(self.average_degree())
    }

    /// Remove every edge that has aged out of the window.
    /// Returns the number of edges removed.
    pub fn evict(&mut self) -> usize {
        let mut removed = 0;
        while let Some((_, oldest)) = self.queue.peek() {
            if !self.expired(oldest) {
                break;
            }
            let Some((key, timestamp)) = self.queue.pop() else {
                break;
            };
            trace!(edge = %key, timestamp, latest = self.latest, "evicting edge");

            let stored = self.edges.remove(&key).is_some();
            let tracked = self.degrees.remove_edge(&key);
            debug_assert!(stored && tracked, "edge {key} queued but not stored");
            if !(stored && tracked) {
                error!(edge = %key, "eviction queue and edge store disagree");
            }
            removed += 1;
        }
        self.evicted += removed as u64;
        removed
    }

    /// Insert the edge `a`-`b` seen at `timestamp`, or refresh it if
    /// `timestamp` is newer than its last sighting. Self-pairs are ignored.
    ///
    /// Does not evict.
    pub fn add_edge(&mut self, timestamp: Timestamp, a: NodeId, b: NodeId) {
        if let Some(key) = EdgeKey::new(a, b) {
            self.refresh(key, timestamp);
        }
    }

    fn refresh(&mut self, key: EdgeKey, timestamp: Timestamp) {
        match self.edges.get(&key) {
            Some(seen) if timestamp <= seen => {}
            Some(_) => {
                self.edges.insert(key, timestamp);
                self.queue.improve(key, timestamp);
            }
            None => {
                self.edges.insert(key, timestamp);
                self.queue.push(key, timestamp);
                self.degrees.add_edge(&key);
            }
        }
    }

    /// `2 * |edges| / |vertices|`, or `0.0` for an empty graph.
    pub fn average_degree(&self) -> f64 {
        let vertices = self.degrees.vertex_count();
        if vertices == 0 {
            return 0.0;
        }
        (2.0 * self.edges.len() as f64) / vertices as f64
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            latest: self.latest,
            edges: self.edge_count(),
            vertices: self.vertex_count(),
            accepted: self.accepted,
            discarded: self.discarded,
            evicted: self.evicted,
            average_degree: self.average_degree(),
        }
    }

    /// Cross-check the edge store, the eviction queue and the degree map.
    pub fn check_invariants(&self) -> Result<()> {
        if self.edges.len() != self.queue.len() {
            return Err(Error::Invariant(format!(
                "{} stored edges but {} queued",
                self.edges.len(),
                self.queue.len()
            )));
        }

        for (key, timestamp) in self.edges.iter() {
            if self.queue.priority(key) != Some(timestamp) {
                return Err(Error::Invariant(format!(
                    "edge {key} stored at {timestamp} but queued at {:?}",
                    self.queue.priority(key)
                )));
            }
            if self.expired(timestamp) {
                return Err(Error::Invariant(format!(
                    "edge {key} at {timestamp} outside window ending at {}",
                    self.latest
                )));
            }
        }

        let vertices = count_vertices(self.edges.keys());
        if vertices != self.degrees.vertex_count() {
            return Err(Error::Invariant(format!(
                "{vertices} vertices in edges but {} tracked",
                self.degrees.vertex_count()
            )));
        }
        if self.degrees.total_degree() != 2 * self.edges.len() {
            return Err(Error::Invariant(format!(
                "total degree {} for {} edges",
                self.degrees.total_degree(),
                self.edges.len()
            )));
        }
        Ok(())
    }
}
