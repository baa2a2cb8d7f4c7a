//! # tagdegree Codec
//!
//! Record formats accepted by the tagdegree graph:
//!
//! - [`binary`] - Compact big-endian frames
//! - [`text`] - `timestamp,node1,node2,...` lines with comment and debug markers
//! - [`tweet`] - Raw tweet JSON, filtered down to records

pub mod binary;
pub mod error;
pub mod text;
pub mod tweet;

pub use binary::BinaryReader;
pub use error::{CodecError, Result};
pub use text::{format_record, parse_line, TextLine};
pub use tweet::{parse_created_at, parse_tweet, Tweet, TweetFilter};
