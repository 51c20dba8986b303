//! Writable store
//!
//! Accumulates pairs in memory and rewrites the whole file on `save`.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bytes::BytesMut;
use parking_lot::RwLock;

use crate::config::Config;
use crate::error::{FixedKvError, Result};
use crate::format::{self, FormatVersion, CURRENT_VERSION, HEADER_SIZE};
use crate::memtable::MemTable;

use super::backing::{self, Backing};
use super::ReadView;

/// Store handle opened against an empty (usually newly created) file
///
/// ## Concurrency:
/// - `state`: one RwLock over the file handle and the table
/// - `set`/`save`/`close` hold the write lock for their whole duration,
///   including the disk write and sync
#[derive(Debug)]
pub struct Writer {
    path: PathBuf,
    config: Config,
    state: RwLock<Backing>,
}

impl Writer {
    pub(crate) fn new(path: &Path, file: File, config: Config) -> Self {
        Self {
            path: path.to_path_buf(),
            config,
            state: RwLock::new(Backing::new(file)),
        }
    }

    /// Insert or overwrite `key`. Nothing reaches disk until `save`.
    ///
    /// Returns the previous value if the key was already present.
    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>> {
        if key.len() > u16::MAX as usize {
            return Err(FixedKvError::KeyTooLarge(key.len()));
        }
        if value.len() > u16::MAX as usize {
            return Err(FixedKvError::ValueTooLarge(value.len()));
        }

        let mut state = self.state.write();
        state.file_mut()?;

        Ok(state.table.put(key.to_vec(), value.to_vec()))
    }

    /// Look up `key`: unsaved entries first, then the saved file.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        backing::lookup(&self.state, key)
    }

    /// Rewrite the file with the header and every entry in ascending key order.
    ///
    /// Each call writes the full image from offset 0, truncates anything past
    /// it and syncs. Saving twice without a `set` in between produces the
    /// same bytes.
    pub fn save(&self) -> Result<()> {
        let mut state = self.state.write();
        let Backing { file, table } = &mut *state;
        let file = file.as_mut().ok_or(FixedKvError::Closed)?;

        let image = encode_image(table, self.config.capacity)?;

        file.seek(SeekFrom::Start(0))?;
        file.write_all(&image)?;
        file.set_len(image.len() as u64)?;
        file.sync_all()?;

        tracing::debug!(
            path = %self.path.display(),
            keys = table.len(),
            bytes = image.len(),
            "store saved"
        );
        Ok(())
    }

    /// Sync and release the file. Unsaved entries are discarded.
    pub fn close(&self) -> Result<()> {
        backing::close(&self.state)
    }

    /// Number of entries currently held in memory
    pub fn len(&self) -> usize {
        self.state.read().table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> FormatVersion {
        CURRENT_VERSION
    }
}

impl ReadView for Writer {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.get(key)
    }

    fn version(&self) -> FormatVersion {
        CURRENT_VERSION
    }
}

/// Header + records in one contiguous buffer, checked against `capacity`.
fn encode_image(table: &MemTable, capacity: usize) -> Result<BytesMut> {
    let key_count =
        u16::try_from(table.len()).map_err(|_| FixedKvError::TooManyKeys(table.len()))?;

    let needed = HEADER_SIZE + table.encoded_size();
    if needed > capacity {
        return Err(FixedKvError::StoreFull { needed, capacity });
    }

    let mut buf = BytesMut::with_capacity(needed);
    buf.resize(HEADER_SIZE, 0);
    format::write_header(&mut buf[..], CURRENT_VERSION, key_count);

    for (key, value) in table.iter() {
        format::encode_record(&mut buf, key, value);
    }

    debug_assert_eq!(buf.len(), needed);
    Ok(buf)
}
