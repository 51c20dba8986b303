//! Reader
//!
//! Loads a saved store into memory once and serves lookups from the buffer
//! via an offset index. No disk access happens after `open`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::Config;
use crate::error::{FixedKvError, Result};
use crate::format::{self, FormatVersion, RecordCursor, RecordRef, HEADER_SIZE};
use crate::store::ReadView;

/// Readonly view over a loaded store image
///
/// Immutable after `open`, so it can be shared across threads without locking.
/// Every accessor returns owned copies; nothing hands out views into `buf`.
#[derive(Debug)]
pub struct Reader {
    /// Whole file contents (header + records)
    buf: Vec<u8>,
    /// In-memory index: key → offset of its record in `buf`
    index: BTreeMap<Vec<u8>, usize>,
    version: FormatVersion,
}

impl Reader {
    /// Open a store for reading with the default config
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Open a store for reading
    ///
    /// Reads the whole file (refusing anything past `config.capacity`),
    /// validates the header and builds the offset index from exactly
    /// `key_count` records.
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        // One byte past capacity is enough to tell an oversize file apart.
        let mut buf = Vec::with_capacity(config.capacity.min(file.metadata()?.len() as usize));
        file.take((config.capacity as u64).saturating_add(1))
            .read_to_end(&mut buf)?;
        if buf.len() > config.capacity {
            return Err(FixedKvError::StoreFull {
                needed: buf.len(),
                capacity: config.capacity,
            });
        }

        let reader = Self::from_bytes(buf)?;
        tracing::debug!(
            path = %path.display(),
            keys = reader.len(),
            bytes = reader.buf.len(),
            "reader index built"
        );
        Ok(reader)
    }

    /// Build a reader over an in-memory store image
    pub fn from_bytes(buf: Vec<u8>) -> Result<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(FixedKvError::InvalidHeader(format!(
                "buffer holds {} bytes, header needs {}",
                buf.len(),
                HEADER_SIZE
            )));
        }
        if !format::validate_header(&buf) {
            return Err(FixedKvError::InvalidHeader(
                "version or magic mismatch".to_string(),
            ));
        }

        let version =
            FormatVersion::decode(u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]));
        let key_count = format::read_key_count(&buf) as usize;

        let mut index = BTreeMap::new();
        for record in RecordCursor::new(&buf, HEADER_SIZE, key_count) {
            let record = record?;
            index.insert(record.key.to_vec(), record.offset);
        }

        Ok(Self {
            buf,
            index,
            version,
        })
    }

    /// Get a copy of the value stored under `key`
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.index.get(key).map(|&offset| self.value_at(offset).to_vec())
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    /// All keys in ascending order
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.index.keys().cloned().collect()
    }

    /// Copies of all values, in key order
    pub fn values(&self) -> Vec<Vec<u8>> {
        self.index
            .values()
            .map(|&offset| self.value_at(offset).to_vec())
            .collect()
    }

    /// (key, value) copies in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (Vec<u8>, Vec<u8>)> + '_ {
        self.index
            .iter()
            .map(|(key, &offset)| (key.clone(), self.value_at(offset).to_vec()))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }

    // Offsets in `index` were decoded from `buf` during open.
    fn value_at(&self, offset: usize) -> &[u8] {
        match RecordRef::decode_at(&self.buf, offset) {
            Ok(record) => record.value,
            Err(_) => unreachable!("index offset {offset} was validated at open"),
        }
    }
}

impl ReadView for Reader {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.get(key))
    }

    fn version(&self) -> FormatVersion {
        self.version
    }
}
