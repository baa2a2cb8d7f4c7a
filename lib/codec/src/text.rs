// Line-oriented text records: `timestamp,node1,node2,...`
use tagdegree_core::{NodeList, Record, Timestamp};

use crate::{CodecError, Result};

pub const COMMENT_MARKER: char = '#';
pub const DEBUG_MARKER: char = '@';

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextLine {
    Record(Record),
    /// Ignored entirely.
    Comment,
    /// Echoed verbatim to the output and otherwise skipped.
    Debug(String),
    Blank,
}

pub fn parse_line(line: &str) -> Result<TextLine> {
    let line = line.trim_end_matches(&['\n', '\r'][..]);
    if line.trim().is_empty() {
        return Ok(TextLine::Blank);
    }
    if line.starts_with(COMMENT_MARKER) {
        return Ok(TextLine::Comment);
    }
    if line.starts_with(DEBUG_MARKER) {
        return Ok(TextLine::Debug(line.to_string()));
    }

    let mut fields = line.split(',').map(parse_field);
    let timestamp: Timestamp = match fields.next() {
        Some(field) => field?,
        None => unreachable!("split always yields one field"),
    };
    let nodes = fields.collect::<Result<NodeList>>()?;
    Ok(TextLine::Record(Record::new(timestamp, nodes)?))
}

fn parse_field(field: &str) -> Result<i64> {
    let field = field.trim();
    field.parse().map_err(|source| CodecError::InvalidField {
        field: field.to_string(),
        source,
    })
}

pub fn format_record(record: &Record) -> String {
    let mut line = record.timestamp().to_string();
    for node in record.nodes() {
        line.push(',');
        line.push_str(&node.to_string());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_line() {
        let parsed = parse_line("75, 6,4\n").unwrap();
        assert_eq!(parsed, TextLine::Record(Record::new(75, [4, 6]).unwrap()));
    }

    #[test]
    fn test_parse_negative_node_ids() {
        let parsed = parse_line("10,-4611686018427387904,17").unwrap();
        let TextLine::Record(record) = parsed else {
            panic!("expected a record");
        };
        assert_eq!(record.nodes(), &[-4611686018427387904, 17]);
    }

    #[test]
    fn test_markers_and_blank_lines() {
        assert_eq!(parse_line("# header").unwrap(), TextLine::Comment);
        assert_eq!(
            parse_line("@ checkpoint 3\r\n").unwrap(),
            TextLine::Debug("@ checkpoint 3".to_string())
        );
        assert_eq!(parse_line("   \n").unwrap(), TextLine::Blank);
    }

    #[test]
    fn test_invalid_lines() {
        assert!(matches!(
            parse_line("abc,1,2"),
            Err(CodecError::InvalidField { ref field, .. }) if field == "abc"
        ));
        assert!(matches!(parse_line("10,1,"), Err(CodecError::InvalidField { .. })));
        assert!(matches!(parse_line("10,1,1"), Err(CodecError::Record(_))));
        assert!(matches!(parse_line("10"), Err(CodecError::Record(_))));
    }

    #[test]
    fn test_format_record() {
        let record = Record::new(1446699939, [9, -3, 2]).unwrap();
        assert_eq!(format_record(&record), "1446699939,-3,2,9");
        assert_eq!(
            parse_line(&format_record(&record)).unwrap(),
            TextLine::Record(record)
        );
    }
}
