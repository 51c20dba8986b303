//! # FixedKV
//!
//! A minimal embedded key-value store backed by a single file:
//! - Fixed-size header (version, key count, magic)
//! - Packed, length-prefixed records in ascending key order
//! - Whole-file rewrite on save, no incremental updates
//! - Bulk-loaded reader with an in-memory offset index
//!
//! ## Architecture Overview
//!
//! ```text
//!   FixedKv::open(path)                    Reader::open(path)
//!          │                                      │
//!    ┌─────┴───────┐                              ▼
//!    │             │                     ┌─────────────────┐
//!    ▼             ▼                     │  loaded buffer  │
//! ┌────────┐  ┌───────────┐              │ + offset index  │
//! │ Writer │  │ Inspector │              └────────┬────────┘
//! │(empty) │  │ (existing)│                       │
//! └───┬────┘  └─────┬─────┘                       │
//!     │ MemTable    │ scan + memoize              │
//!     ▼             ▼                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  [Header 96B][KeyLen|ValLen|Key|Value]...   (one file)    │
//! └──────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod format;
pub mod memtable;
pub mod store;
pub mod reader;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FixedKvError, Result};
pub use config::Config;
pub use format::FormatVersion;
pub use reader::Reader;
pub use store::{FixedKv, Inspector, Mode, ReadView, Writer};

// =============================================================================
// Version Info
// =============================================================================

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
