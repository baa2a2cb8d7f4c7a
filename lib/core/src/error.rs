use thiserror::Error;

use crate::graph::Timestamp;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid record at {timestamp}: expected at least 2 distinct nodes, got {distinct}")]
    InvalidRecord { timestamp: Timestamp, distinct: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),
}
