//! Record codec
//!
//! `[KeyLen: u16][ValLen: u16][Key][Value]`, packed back to back.

use std::io::{self, Read};

use bytes::BufMut;

use crate::error::{FixedKvError, Result};

use super::RECORD_HEADER_SIZE;

/// Encoded size of one record
pub fn record_len(key: &[u8], value: &[u8]) -> usize {
    RECORD_HEADER_SIZE + key.len() + value.len()
}

/// Append one record to `buf`.
///
/// Lengths must already be known to fit in u16; the writer checks them on `set`.
pub fn encode_record<B: BufMut>(buf: &mut B, key: &[u8], value: &[u8]) {
    buf.put_u16_le(key.len() as u16);
    buf.put_u16_le(value.len() as u16);
    buf.put_slice(key);
    buf.put_slice(value);
}

/// Read one record from a byte stream.
///
/// Returns `Ok(None)` on a clean end-of-stream before the first length byte.
/// A stream that ends anywhere inside a record is an `UnexpectedEof` error.
pub(crate) fn read_record<R: Read>(r: &mut R) -> io::Result<Option<(Vec<u8>, Vec<u8>)>> {
    let mut prefix = [0u8; RECORD_HEADER_SIZE];
    let mut filled = 0;
    while filled < prefix.len() {
        match r.read(&mut prefix[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(io::ErrorKind::UnexpectedEof.into()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    let key_len = u16::from_le_bytes([prefix[0], prefix[1]]) as usize;
    let val_len = u16::from_le_bytes([prefix[2], prefix[3]]) as usize;

    let mut key = vec![0u8; key_len];
    r.read_exact(&mut key)?;
    let mut value = vec![0u8; val_len];
    r.read_exact(&mut value)?;

    Ok(Some((key, value)))
}

/// A record decoded in place from a loaded buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRef<'a> {
    /// Byte offset of the record's length prefix within the buffer
    pub offset: usize,
    pub key: &'a [u8],
    pub value: &'a [u8],
}

impl<'a> RecordRef<'a> {
    /// Decode the record starting at `offset`, bounds-checked against `buf`
    pub fn decode_at(buf: &'a [u8], offset: usize) -> Result<Self> {
        let corrupt = |reason: &str| FixedKvError::CorruptRecord {
            offset,
            reason: reason.to_string(),
        };

        let prefix_end = offset
            .checked_add(RECORD_HEADER_SIZE)
            .filter(|&end| end <= buf.len())
            .ok_or_else(|| corrupt("truncated length prefix"))?;

        let key_len = u16::from_le_bytes([buf[offset], buf[offset + 1]]) as usize;
        let val_len = u16::from_le_bytes([buf[offset + 2], buf[offset + 3]]) as usize;

        let key_end = prefix_end + key_len;
        let val_end = key_end + val_len;
        if val_end > buf.len() {
            return Err(corrupt("record extends past end of buffer"));
        }

        Ok(Self {
            offset,
            key: &buf[prefix_end..key_end],
            value: &buf[key_end..val_end],
        })
    }

    /// Encoded size, i.e. distance to the next record
    pub fn encoded_len(&self) -> usize {
        record_len(self.key, self.value)
    }
}

/// Walks exactly `count` records starting at `offset`
pub struct RecordCursor<'a> {
    buf: &'a [u8],
    offset: usize,
    remaining: usize,
}

impl<'a> RecordCursor<'a> {
    pub fn new(buf: &'a [u8], offset: usize, count: usize) -> Self {
        Self {
            buf,
            offset,
            remaining: count,
        }
    }

    /// Offset just past the last record yielded so far
    pub fn position(&self) -> usize {
        self.offset
    }
}

impl<'a> Iterator for RecordCursor<'a> {
    type Item = Result<RecordRef<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match RecordRef::decode_at(self.buf, self.offset) {
            Ok(record) => {
                self.remaining -= 1;
                self.offset += record.encoded_len();
                Some(Ok(record))
            }
            Err(e) => {
                // Nothing sensible follows a broken record.
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
