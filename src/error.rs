//! Error types for FixedKV
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using FixedKvError
pub type Result<T> = std::result::Result<T, FixedKvError>;

/// Unified error type for FixedKV operations
#[derive(Debug, Error)]
pub enum FixedKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Format Errors
    // -------------------------------------------------------------------------
    #[error("invalid header format: {0}")]
    InvalidHeader(String),

    #[error("corrupt record at offset {offset}: {reason}")]
    CorruptRecord { offset: usize, reason: String },

    // -------------------------------------------------------------------------
    // Mode / Lifecycle Errors
    // -------------------------------------------------------------------------
    #[error("readonly db")]
    Readonly,

    #[error("database closed")]
    Closed,

    // -------------------------------------------------------------------------
    // Capacity Errors
    // -------------------------------------------------------------------------
    #[error("store full: {needed} bytes needed, capacity is {capacity}")]
    StoreFull { needed: usize, capacity: usize },

    #[error("key too large: {0} bytes (max {max})", max = u16::MAX)]
    KeyTooLarge(usize),

    #[error("value too large: {0} bytes (max {max})", max = u16::MAX)]
    ValueTooLarge(usize),

    #[error("too many keys: {0} (max {max})", max = u16::MAX)]
    TooManyKeys(usize),
}
