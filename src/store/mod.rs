//! Store Module
//!
//! The read-write entry point. Opening a path yields one of two variants:
//!
//! - [`Writer`] when the file is empty (newly created): pairs accumulate in an
//!   ordered in-memory table and `save` rewrites the whole file.
//! - [`Inspector`] when the file already holds a saved store: writes are
//!   rejected with `Readonly`, lookups scan the file and memoize hits.
//!
//! Both share the [`ReadView`] capability with [`crate::Reader`].

mod backing;
mod inspector;
mod writer;

use std::fs::OpenOptions;
use std::io::Read;
use std::path::Path;

use crate::config::Config;
use crate::error::{FixedKvError, Result};
use crate::format::{self, FormatVersion, HEADER_SIZE};

pub use inspector::Inspector;
pub use writer::Writer;

/// Read access shared by every handle type
pub trait ReadView {
    /// Value stored under `key`, or `None` if absent
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Format version of the store behind this handle
    fn version(&self) -> FormatVersion;
}

/// Which variant `open` produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Writable,
    Readonly,
}

/// A store opened for read-write access
#[derive(Debug)]
pub enum FixedKv {
    Writable(Writer),
    Readonly(Inspector),
}

impl FixedKv {
    /// Open or create a store at `path` with the default config
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, Config::default())
    }

    /// Open or create a store at `path`
    ///
    /// - empty file → [`FixedKv::Writable`]
    /// - at least `HEADER_SIZE` bytes with a valid header → [`FixedKv::Readonly`]
    /// - anything else → `InvalidHeader`
    pub fn open_with_config(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let path = path.as_ref();
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(config.create_if_missing)
            .open(path)?;

        let mut header = Vec::with_capacity(HEADER_SIZE);
        (&mut file).take(HEADER_SIZE as u64).read_to_end(&mut header)?;
        file.sync_all()?;

        if header.is_empty() {
            tracing::debug!(path = %path.display(), "opened empty file, writable");
            return Ok(FixedKv::Writable(Writer::new(path, file, config)));
        }

        if header.len() < HEADER_SIZE {
            return Err(FixedKvError::InvalidHeader(format!(
                "file holds {} bytes, header needs {}",
                header.len(),
                HEADER_SIZE
            )));
        }
        if !format::validate_header(&header) {
            return Err(FixedKvError::InvalidHeader(
                "version or magic mismatch".to_string(),
            ));
        }

        let version = FormatVersion::decode(u32::from_le_bytes([
            header[0], header[1], header[2], header[3],
        ]));
        let key_count = format::read_key_count(&header);

        tracing::debug!(
            path = %path.display(),
            keys = key_count,
            "opened existing store, readonly"
        );
        Ok(FixedKv::Readonly(Inspector::new(path, file, version, key_count)))
    }

    pub fn mode(&self) -> Mode {
        match self {
            FixedKv::Writable(_) => Mode::Writable,
            FixedKv::Readonly(_) => Mode::Readonly,
        }
    }

    pub fn is_readonly(&self) -> bool {
        self.mode() == Mode::Readonly
    }

    /// Insert or overwrite a pair in memory. Fails with `Readonly` on an
    /// existing store.
    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<Option<Vec<u8>>> {
        match self {
            FixedKv::Writable(w) => w.set(key, value),
            FixedKv::Readonly(_) => Err(FixedKvError::Readonly),
        }
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        match self {
            FixedKv::Writable(w) => w.get(key),
            FixedKv::Readonly(r) => r.get(key),
        }
    }

    /// Persist every pair. Fails with `Readonly` on an existing store.
    pub fn save(&self) -> Result<()> {
        match self {
            FixedKv::Writable(w) => w.save(),
            FixedKv::Readonly(_) => Err(FixedKvError::Readonly),
        }
    }

    /// Release the file. Does not save.
    pub fn close(&self) -> Result<()> {
        match self {
            FixedKv::Writable(w) => w.close(),
            FixedKv::Readonly(r) => r.close(),
        }
    }

    /// Entries in memory for a writable store, declared key count otherwise
    pub fn len(&self) -> usize {
        match self {
            FixedKv::Writable(w) => w.len(),
            FixedKv::Readonly(r) => r.key_count() as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn path(&self) -> &Path {
        match self {
            FixedKv::Writable(w) => w.path(),
            FixedKv::Readonly(r) => r.path(),
        }
    }

    pub fn version(&self) -> FormatVersion {
        match self {
            FixedKv::Writable(w) => w.version(),
            FixedKv::Readonly(r) => r.version(),
        }
    }
}

impl ReadView for FixedKv {
    fn lookup(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.get(key)
    }

    fn version(&self) -> FormatVersion {
        FixedKv::version(self)
    }
}
