//! Upstream filter turning raw tweet JSON into graph records.
//!
//! Anything that is not a usable tweet (rate-limit notices, malformed JSON,
//! unparseable creation times, fewer than two distinct hashtags) is dropped
//! here and never reaches the graph.

use chrono::DateTime;
use serde::Deserialize;
use tagdegree_core::{Record, TagInterner, Timestamp};
use tracing::{debug, warn};

use crate::{CodecError, Result};

/// `Thu Nov 05 05:05:39 +0000 2015`
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Deserialize)]
struct RawTweet {
    created_at: Option<String>,
    #[serde(default)]
    entities: Option<Entities>,
}

#[derive(Debug, Default, Deserialize)]
struct Entities {
    #[serde(default)]
    hashtags: Vec<Hashtag>,
}

#[derive(Debug, Deserialize)]
struct Hashtag {
    text: String,
}

/// A tweet reduced to what the graph needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub created_at: Timestamp,
    /// Distinct hashtag texts, sorted.
    pub hashtags: Vec<String>,
}

/// Seconds since the Unix epoch for a Twitter `created_at` value.
pub fn parse_created_at(value: &str) -> Result<Timestamp> {
    DateTime::parse_from_str(value, CREATED_AT_FORMAT)
        .map(|dt| dt.timestamp())
        .map_err(|source| CodecError::CreatedAt {
            value: value.to_string(),
            source,
        })
}

/// Parse one JSON line. `Ok(None)` means valid JSON that is not a tweet.
pub fn parse_tweet(line: &str) -> Result<Option<Tweet>> {
    let raw: RawTweet = serde_json::from_str(line)?;
    let Some(created_at) = raw.created_at else {
        return Ok(None);
    };
    let created_at = parse_created_at(&created_at)?;

    let mut hashtags: Vec<String> = raw
        .entities
        .unwrap_or_default()
        .hashtags
        .into_iter()
        .map(|h| h.text)
        .collect();
    hashtags.sort_unstable();
    hashtags.dedup();

    Ok(Some(Tweet {
        created_at,
        hashtags,
    }))
}

/// Maps tweets to records, assigning node ids through a [`TagInterner`].
#[derive(Debug, Default)]
pub struct TweetFilter {
    tags: TagInterner,
    dropped: u64,
}

impl TweetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_line(&mut self, line: &str) -> Option<Record> {
        if line.trim().is_empty() {
            return None;
        }
        let tweet = match parse_tweet(line) {
            Ok(Some(tweet)) => tweet,
            Ok(None) => {
                debug!("skipping non-tweet message");
                self.dropped += 1;
                return None;
            }
            Err(e) => {
                warn!(error = %e, "malformed: {}", line.trim_end());
                self.dropped += 1;
                return None;
            }
        };
        self.filter(&tweet)
    }

    pub fn filter(&mut self, tweet: &Tweet) -> Option<Record> {
        if tweet.hashtags.len() < 2 {
            debug!(
                created_at = tweet.created_at,
                hashtags = tweet.hashtags.len(),
                "skipping tweet without a hashtag pair"
            );
            self.dropped += 1;
            return None;
        }

        let nodes: Vec<_> = tweet
            .hashtags
            .iter()
            .map(|tag| self.tags.intern(tag))
            .collect();
        match Record::new(tweet.created_at, nodes) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(error = %e, "skipping tweet");
                self.dropped += 1;
                None
            }
        }
    }

    pub fn tags(&self) -> &TagInterner {
        &self.tags
    }

    /// Number of input lines that did not produce a record.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWEET: &str = r#"{"created_at":"Thu Nov 05 05:06:39 +0000 2015","id":1,"entities":{"hashtags":[{"text":"ABCD"},{"text":"EFGH"},{"text":"ABCD"}]}}"#;

    #[test]
    fn test_parse_created_at() {
        let first = parse_created_at("Thu Nov 05 05:05:39 +0000 2015").unwrap();
        let second = parse_created_at("Thu Nov 05 05:06:39 +0000 2015").unwrap();
        assert_eq!(first, 1446699939);
        assert_eq!(second - first, 60);
    }

    #[test]
    fn test_parse_created_at_invalid() {
        assert!(matches!(
            parse_created_at("Thu Nov 05"),
            Err(CodecError::CreatedAt { .. })
        ));
    }

    #[test]
    fn test_parse_tweet_dedups_hashtags() {
        let tweet = parse_tweet(TWEET).unwrap().unwrap();
        assert_eq!(tweet.created_at, 1446699999);
        assert_eq!(tweet.hashtags, vec!["ABCD", "EFGH"]);
    }

    #[test]
    fn test_parse_tweet_without_entities() {
        let tweet = parse_tweet(r#"{"created_at":"Thu Nov 05 05:05:39 +0000 2015"}"#)
            .unwrap()
            .unwrap();
        assert!(tweet.hashtags.is_empty());
    }

    #[test]
    fn test_limit_message_is_not_a_tweet() {
        let limit = r#"{"limit":{"track":262,"timestamp_ms":"1459231487897"}}"#;
        assert_eq!(parse_tweet(limit).unwrap(), None);
    }

    #[test]
    fn test_filter_assigns_node_ids() {
        let mut filter = TweetFilter::new();
        let record = filter.filter_line(TWEET).unwrap();
        assert_eq!(record.timestamp(), 1446699999);
        assert_eq!(record.nodes(), &[0, 1]);
        assert_eq!(filter.tags().get("EFGH"), Some(1));
    }

    #[test]
    fn test_filter_drops_unusable_lines() {
        let mut filter = TweetFilter::new();
        assert!(filter.filter_line("not json").is_none());
        assert!(filter
            .filter_line(r#"{"created_at":"Thu Nov 05"}"#)
            .is_none());
        assert!(filter
            .filter_line(r#"{"created_at":"Thu Nov 05 05:05:39 +0000 2015","entities":{"hashtags":[{"text":"solo"},{"text":"solo"}]}}"#)
            .is_none());
        assert!(filter.filter_line("").is_none());
        assert_eq!(filter.dropped(), 3);
        assert!(filter.tags().is_empty());
    }
}
