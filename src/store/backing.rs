//! Shared handle state
//!
//! File handle + in-memory table, guarded by one RwLock in the owner, and the
//! disk-scan fallback used by `get` on both store variants.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

use parking_lot::{RwLock, RwLockUpgradableReadGuard};

use crate::error::{FixedKvError, Result};
use crate::format::{self, HEADER_SIZE};
use crate::memtable::MemTable;

/// Mutable state of an open store handle. `file` is `None` once closed.
#[derive(Debug)]
pub(crate) struct Backing {
    pub(crate) file: Option<File>,
    pub(crate) table: MemTable,
}

impl Backing {
    pub(crate) fn new(file: File) -> Self {
        Self {
            file: Some(file),
            table: MemTable::new(),
        }
    }

    pub(crate) fn file_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(FixedKvError::Closed)
    }
}

/// Table first; on a miss, scan the on-disk record stream and memoize a hit.
///
/// The scan holds an upgradable read lock, so it serializes against writers
/// and other scans but not against plain table reads.
pub(crate) fn lookup(lock: &RwLock<Backing>, key: &[u8]) -> Result<Option<Vec<u8>>> {
    let state = lock.upgradable_read();
    let file = state.file.as_ref().ok_or(FixedKvError::Closed)?;

    if let Some(value) = state.table.get(key) {
        return Ok(Some(value.to_vec()));
    }

    let found = scan_for_key(file, key)?;

    if let Some(value) = &found {
        tracing::trace!(key_len = key.len(), "disk scan hit, caching");
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        state.table.put(key.to_vec(), value.clone());
    }

    Ok(found)
}

/// Linear scan of the record stream, bounded by the header's key count.
///
/// A file without a valid header yet (a new store before its first save)
/// holds no records.
fn scan_for_key(mut file: &File, key: &[u8]) -> Result<Option<Vec<u8>>> {
    file.seek(SeekFrom::Start(0))?;

    let mut header = Vec::with_capacity(HEADER_SIZE);
    file.take(HEADER_SIZE as u64).read_to_end(&mut header)?;
    if !format::validate_header(&header) {
        return Ok(None);
    }
    let key_count = format::read_key_count(&header);

    let mut reader = BufReader::new(file);
    for _ in 0..key_count {
        match format::read_record(&mut reader)? {
            Some((record_key, value)) if record_key == key => return Ok(Some(value)),
            Some(_) => continue,
            None => break,
        }
    }

    Ok(None)
}

/// Sync and release the file handle. A second call fails with `Closed`.
pub(crate) fn close(lock: &RwLock<Backing>) -> Result<()> {
    let mut state = lock.write();
    let file = state.file.take().ok_or(FixedKvError::Closed)?;
    state.table = MemTable::new();

    file.sync_all()?;
    Ok(())
}
