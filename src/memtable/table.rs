//! MemTable implementation
//!
//! BTreeMap keyed by raw bytes.

use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::format::{record_len, RECORD_HEADER_SIZE};

/// Sorted key → value map with a running encoded-size counter
#[derive(Debug, Default, Clone)]
pub struct MemTable {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    /// Sum of `record_len` over every entry
    encoded_size: usize,
}

impl MemTable {
    /// Create a new empty MemTable
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a value by key
    pub fn get(&self, key: &[u8]) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    /// Insert or overwrite. Returns the previous value when the key existed.
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) -> Option<Vec<u8>> {
        let added = record_len(&key, &value);
        let key_len = key.len();
        let previous = self.data.insert(key, value);

        self.encoded_size += added;
        if let Some(old) = &previous {
            self.encoded_size -= RECORD_HEADER_SIZE + key_len + old.len();
        }

        previous
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.data.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes the record stream would occupy if saved now (header excluded)
    pub fn encoded_size(&self) -> usize {
        self.encoded_size
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> btree_map::Iter<'_, Vec<u8>, Vec<u8>> {
        self.data.iter()
    }
}
