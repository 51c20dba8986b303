//! On-disk format
//!
//! A store file is one fixed-size header followed by a packed record stream.
//!
//! ## File Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ Header (96 bytes)                                           │
//! │   Version: u32 (4) | KeyCount: u16 (2) | Magic (90, padded) │
//! ├─────────────────────────────────────────────────────────────┤
//! │ Record Stream (variable)                                    │
//! │   [KeyLen: u16][ValLen: u16][Key][Value]                    │
//! │   ... repeated KeyCount times, ascending key order ...      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian. Records carry no padding and no
//! separators, and nothing follows the last record.

mod header;
mod record;

pub use header::{
    decode_version, encode_version, read_key_count, validate_header, write_header, FormatVersion,
};
pub use record::{encode_record, record_len, RecordCursor, RecordRef};
pub(crate) use record::read_record;

// =============================================================================
// Shared Constants (used by writer, inspector, reader)
// =============================================================================

/// Total header size; reserved even when the store holds no keys
pub const HEADER_SIZE: usize = 96;

/// Offset of the u16 key count, right after the u32 version
pub const KEY_COUNT_OFFSET: usize = 4;

/// Offset of the magic string, right after the key count
pub const MAGIC_OFFSET: usize = 6;

/// Magic string identifying a FixedKV file
pub const MAGIC: &[u8] = b"FixedKV database";

/// Per-record prefix: KeyLen (2) + ValLen (2)
pub const RECORD_HEADER_SIZE: usize = 4;

/// Format version written by this crate and required on read
pub const CURRENT_VERSION: FormatVersion = FormatVersion::new(1, 0, 0);
