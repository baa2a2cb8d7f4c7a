use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Truncated frame: needed {needed} bytes, got {available}")]
    Truncated { needed: usize, available: usize },

    #[error("Too many nodes for one frame: {0} (max 255)")]
    TooManyNodes(usize),

    #[error("Timestamp out of range: {0}")]
    Timestamp(String),

    #[error("Invalid field {field:?}: {source}")]
    InvalidField {
        field: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error(transparent)]
    Record(#[from] tagdegree_core::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid creation time {value:?}: {source}")]
    CreatedAt {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
