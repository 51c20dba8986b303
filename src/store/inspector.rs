//! Readonly store
//!
//! A store opened against a file that already holds a saved image. Writes are
//! not offered here; lookups scan the file and memoize what they find.

use std::fs::File;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::Result;
use crate::format::FormatVersion;

use super::backing::{self, Backing};
use super::ReadView;

#[derive(Debug)]
pub struct Inspector {
    path: PathBuf,
    version: FormatVersion,
    key_count: u16,
    state: RwLock<Backing>,
}

impl Inspector {
    pub(crate) fn new(path: &Path, file: File, version: FormatVersion, key_count: u16) -> Self {
        Self {
            path: path.to_path_buf(),
            version,
            key_count,
            state: RwLock::new(Backing::new(file)),
        }
    }

    /// Look up `key`, scanning the record stream on the first miss.
    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        backing::lookup(&self.state, key)
    }

    pub fn close(&self) -> Result<()> {
        backing::close(&self.state)
    }

    /// Key count declared in the header at open time
    pub fn key_count(&self) -> u16 {
        self.key_count
    }

    /// Number of records memoized by lookups so far
    pub fn cached(&self) -> usize {
        self.state.read().table.len()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> FormatVersion {
        self.version
    }
}

impl ReadView for Inspector {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.get(key)
    }

    fn version(&self) -> FormatVersion {
        self.version
    }
}
