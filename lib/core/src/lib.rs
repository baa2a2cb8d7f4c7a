//! # tagdegree Core
//!
//! Core library for tagdegree.
//!
//! This crate maintains a hashtag co-occurrence graph over a trailing time
//! window and reports its average vertex degree after every record:
//!
//! - [`Record`] - A timestamp and the distinct nodes seen together
//! - [`EdgeKey`] - Canonical unordered node pair
//! - [`IndexedQueue`] - Min-heap with key lookup, used for eviction order
//! - [`EdgeStore`] - Last-seen timestamp of every retained edge
//! - [`VertexDegrees`] - Incremental vertex accounting
//! - [`WindowedGraph`] - The processor tying them together
//! - [`TagInterner`] - Process-local hashtag to node id mapping
//!
//! ## Example
//!
//! ```rust
//! use tagdegree_core::{ProcessorConfig, Record, WindowedGraph};
//!
//! let mut graph = WindowedGraph::new(ProcessorConfig::with_window(60)).unwrap();
//!
//! let avg = graph.process(&Record::new(0, [1, 2, 3]).unwrap());
//! assert_eq!(avg, Some(2.0));
//!
//! // Everything seen at t=0 falls out of the window.
//! let avg = graph.process(&Record::new(70, [4, 5]).unwrap());
//! assert_eq!(avg, Some(1.0));
//! ```

pub mod degree;
pub mod error;
pub mod graph;
pub mod interner;
pub mod processor;
pub mod queue;
pub mod store;

pub use degree::{count_vertices, VertexDegrees};
pub use error::{Error, Result};
pub use graph::{EdgeKey, NodeId, NodeList, Record, Timestamp};
pub use interner::TagInterner;
pub use processor::{GraphStats, ProcessorConfig, WindowedGraph, DEFAULT_WINDOW};
pub use queue::IndexedQueue;
pub use store::EdgeStore;
