//! # tagdegree
//!
//! Online average vertex degree of a hashtag co-occurrence graph over a
//! trailing time window.
//!
//! Every record names a creation time and the hashtags (as node ids) that
//! appeared together. Each pair of those nodes becomes, or refreshes, an edge.
//! An edge survives while its last sighting is within the window of the newest
//! timestamp seen so far. After each accepted record the current
//! `2 * |edges| / |vertices|` is reported.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! # raw tweets straight to rolling averages
//! tagdegree degree --format tweets < tweets.txt
//!
//! # or in two stages, with compact binary records in between
//! tagdegree clean --format binary < tweets.txt | tagdegree degree --format binary
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use tagdegree::prelude::*;
//!
//! let mut graph = WindowedGraph::new(ProcessorConfig::with_window(60)).unwrap();
//! graph.process(&Record::new(70, [4, 5]).unwrap());
//! let avg = graph.process(&Record::new(75, [4, 6]).unwrap()).unwrap();
//! assert!((avg - 4.0 / 3.0).abs() < 1e-9);
//! ```
//!
//! ## Crate Structure
//!
//! - [`tagdegree-core`](https://docs.rs/tagdegree-core) - Graph types, indexed eviction queue, windowed processor
//! - [`tagdegree-codec`](https://docs.rs/tagdegree-codec) - Binary frames, text lines, tweet filter

pub mod runner;

// Re-export core types
pub use tagdegree_core::{
    EdgeKey, EdgeStore, Error, GraphStats, IndexedQueue, NodeId, ProcessorConfig, Record,
    Result, TagInterner, Timestamp, VertexDegrees, WindowedGraph, DEFAULT_WINDOW,
};

// Re-export codecs
pub use tagdegree_codec::{BinaryReader, CodecError, TextLine, TweetFilter};

pub use runner::{run_clean, run_degree, CleanFormat, InputFormat, RunOptions, RunSummary};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EdgeKey, Error, GraphStats, NodeId, ProcessorConfig, Record, Result, Timestamp,
        WindowedGraph,
        BinaryReader, TextLine, TweetFilter,
        run_clean, run_degree, CleanFormat, InputFormat, RunOptions,
    };
}

/// Codec modules
pub mod codec {
    pub use tagdegree_codec::{binary, text, tweet};
}
