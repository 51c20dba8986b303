//! Configuration for FixedKV
//!
//! Centralized configuration with sensible defaults.

use crate::format::HEADER_SIZE;

/// Default upper bound for a store image (header + records), in bytes
pub const DEFAULT_CAPACITY: usize = 4096;

/// Configuration shared by writable stores and readers
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Max size of a store image (header + all records) in bytes.
    /// `save` fails with `StoreFull` past this, and readers refuse
    /// files larger than it.
    pub capacity: usize,

    /// Create the file when opening a store at a path that does not exist.
    /// When false, opening a missing path surfaces the I/O error.
    pub create_if_missing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            create_if_missing: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the capacity bound (in bytes). Never smaller than the header.
    pub fn capacity(mut self, bytes: usize) -> Self {
        self.config.capacity = bytes.max(HEADER_SIZE);
        self
    }

    /// Set whether a missing file is created on open
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.config.create_if_missing = create;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
