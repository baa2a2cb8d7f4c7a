// Node, edge and record types for the hashtag co-occurrence graph
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

pub type NodeId = i64;
pub type Timestamp = i64;

/// Inline capacity for a record's node list. Most tweets carry only a few hashtags.
pub type NodeList = SmallVec<[NodeId; 8]>;

/// Unordered pair of distinct nodes, stored smaller-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    /// Canonical key for `a`-`b`, or `None` for a self-pair.
    #[inline]
    #[must_use]
    pub fn new(a: NodeId, b: NodeId) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Some(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => None,
        }
    }

    #[inline]
    pub fn low(&self) -> NodeId {
        self.low
    }

    #[inline]
    pub fn high(&self) -> NodeId {
        self.high
    }

    #[inline]
    pub fn endpoints(&self) -> [NodeId; 2] {
        [self.low, self.high]
    }
}

impl std::fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// One accepted event: a creation time and the distinct nodes seen together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    timestamp: Timestamp,
    nodes: NodeList,
}

impl Record {
    /// Build a record, sorting and deduplicating `nodes`.
    ///
    /// Fails with [`Error::InvalidRecord`] when fewer than two distinct
    /// nodes remain, since such a record cannot contribute an edge.
    pub fn new<I>(timestamp: Timestamp, nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = NodeId>,
    {
        let mut nodes: NodeList = nodes.into_iter().collect();
        nodes.sort_unstable();
        nodes.dedup();

        if nodes.len() < 2 {
            return Err(Error::InvalidRecord {
                timestamp,
                distinct: nodes.len(),
            });
        }

        Ok(Self { timestamp, nodes })
    }

    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    #[inline]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Every unordered pair of the record's nodes, each exactly once.
    pub fn pairs(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.nodes.iter().enumerate().flat_map(move |(i, &a)| {
            self.nodes[i + 1..]
                .iter()
                .filter_map(move |&b| EdgeKey::new(a, b))
        })
    }
}
