//! Compact binary record frames.
//!
//! ```text
//! +----------------+-------+---------------------------+
//! | timestamp u64  | count | count x node id i64       |
//! | big-endian     | u8    | big-endian                |
//! +----------------+-------+---------------------------+
//! ```

use bytes::{Buf, BufMut, BytesMut};
use std::io::{ErrorKind, Read};
use tagdegree_core::{NodeList, Record};

use crate::{CodecError, Result};

/// Timestamp plus node count.
pub const HEADER_LEN: usize = 9;
pub const NODE_LEN: usize = 8;
pub const MAX_NODES: usize = u8::MAX as usize;

/// Append one frame for `record` to `dst`.
pub fn encode(record: &Record, dst: &mut BytesMut) -> Result<()> {
    let nodes = record.nodes();
    if nodes.len() > MAX_NODES {
        return Err(CodecError::TooManyNodes(nodes.len()));
    }
    let timestamp = u64::try_from(record.timestamp())
        .map_err(|_| CodecError::Timestamp(record.timestamp().to_string()))?;

    dst.reserve(HEADER_LEN + nodes.len() * NODE_LEN);
    dst.put_u64(timestamp);
    dst.put_u8(nodes.len() as u8);
    for &node in nodes {
        dst.put_i64(node);
    }
    Ok(())
}

/// Decode one frame from the front of `src`.
///
/// A complete frame is always consumed, even when its contents fail record
/// validation, so a caller can skip the bad frame and keep reading.
pub fn decode<B: Buf>(src: &mut B) -> Result<Record> {
    if src.remaining() < HEADER_LEN {
        return Err(CodecError::Truncated {
            needed: HEADER_LEN,
            available: src.remaining(),
        });
    }

    let timestamp = src.get_u64();
    let count = src.get_u8() as usize;
    if src.remaining() < count * NODE_LEN {
        return Err(CodecError::Truncated {
            needed: count * NODE_LEN,
            available: src.remaining(),
        });
    }

    let nodes: NodeList = (0..count).map(|_| src.get_i64()).collect();
    let timestamp =
        i64::try_from(timestamp).map_err(|_| CodecError::Timestamp(timestamp.to_string()))?;
    Ok(Record::new(timestamp, nodes)?)
}

/// Iterates the frames of a byte stream.
///
/// Iteration ends at a clean end of stream. Running out of bytes inside a
/// frame, or an IO error, yields one final error.
pub struct BinaryReader<R> {
    inner: R,
    frame: BytesMut,
    done: bool,
}

impl<R: Read> BinaryReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            frame: BytesMut::with_capacity(HEADER_LEN + 16 * NODE_LEN),
            done: false,
        }
    }

    fn read_frame(&mut self) -> Result<Option<Record>> {
        let mut header = [0u8; HEADER_LEN];
        let got = read_full(&mut self.inner, &mut header)?;
        if got == 0 {
            return Ok(None);
        }
        if got < HEADER_LEN {
            return Err(CodecError::Truncated {
                needed: HEADER_LEN,
                available: got,
            });
        }

        let body_len = header[HEADER_LEN - 1] as usize * NODE_LEN;
        self.frame.clear();
        self.frame.extend_from_slice(&header);
        self.frame.resize(HEADER_LEN + body_len, 0);

        let got = read_full(&mut self.inner, &mut self.frame[HEADER_LEN..])?;
        if got < body_len {
            return Err(CodecError::Truncated {
                needed: body_len,
                available: got,
            });
        }

        decode(&mut &self.frame[..]).map(Some)
    }
}

impl<R: Read> Iterator for BinaryReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_frame() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e @ CodecError::Record(_)) | Err(e @ CodecError::Timestamp(_)) => Some(Err(e)),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Fill `buf` as far as the reader allows; returns the number of bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: i64, nodes: &[i64]) -> Record {
        Record::new(timestamp, nodes.iter().copied()).unwrap()
    }

    #[test]
    fn test_frame_layout() {
        let mut buf = BytesMut::new();
        encode(&record(1, &[2, -1]), &mut buf).unwrap();

        let mut expected = vec![0, 0, 0, 0, 0, 0, 0, 1, 2];
        expected.extend_from_slice(&(-1i64).to_be_bytes());
        expected.extend_from_slice(&2i64.to_be_bytes());
        assert_eq!(&buf[..], &expected[..]);
    }

    #[test]
    fn test_decode_rejects_short_input() {
        let mut src: &[u8] = &[0, 0, 0, 0, 0, 0, 0, 1, 2, 0, 0];
        assert!(matches!(
            decode(&mut src),
            Err(CodecError::Truncated { needed: 16, available: 2 })
        ));
    }

    #[test]
    fn test_decode_consumes_invalid_frame() {
        let mut buf = BytesMut::new();
        buf.put_u64(5);
        buf.put_u8(2);
        buf.put_i64(3);
        buf.put_i64(3);
        encode(&record(6, &[1, 2]), &mut buf).unwrap();

        let mut src = buf.freeze();
        assert!(matches!(decode(&mut src), Err(CodecError::Record(_))));
        assert_eq!(decode(&mut src).unwrap(), record(6, &[1, 2]));
        assert!(!src.has_remaining());
    }

    #[test]
    fn test_encode_rejects_negative_timestamp() {
        let mut buf = BytesMut::new();
        let err = encode(&record(-5, &[1, 2]), &mut buf).unwrap_err();
        assert!(matches!(err, CodecError::Timestamp(_)));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_encode_rejects_oversized_record() {
        let mut buf = BytesMut::new();
        let big = Record::new(0, 0..300).unwrap();
        assert!(matches!(encode(&big, &mut buf), Err(CodecError::TooManyNodes(300))));
    }

    #[test]
    fn test_reader_skips_bad_frame_and_stops_on_truncation() {
        let mut buf = BytesMut::new();
        encode(&record(10, &[1, 2, 3]), &mut buf).unwrap();
        buf.put_u64(11);
        buf.put_u8(1);
        buf.put_i64(4);
        encode(&record(12, &[5, 6]), &mut buf).unwrap();
        buf.put_u64(13);

        let items: Vec<_> = BinaryReader::new(&buf[..]).collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].as_ref().unwrap(), &record(10, &[1, 2, 3]));
        assert!(matches!(items[1], Err(CodecError::Record(_))));
        assert_eq!(items[2].as_ref().unwrap(), &record(12, &[5, 6]));
        assert!(matches!(items[3], Err(CodecError::Truncated { needed: 9, available: 8 })));
    }

    #[test]
    fn test_reader_empty_stream() {
        assert_eq!(BinaryReader::new(std::io::empty()).count(), 0);
    }
}
