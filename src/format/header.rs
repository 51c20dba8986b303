//! Header codec
//!
//! Encodes and validates the fixed 96-byte prefix of a store file.

use std::fmt;

use super::{CURRENT_VERSION, HEADER_SIZE, KEY_COUNT_OFFSET, MAGIC, MAGIC_OFFSET};

/// Tri-part format version packed into one little-endian u32
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl FormatVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self { major, minor, patch }
    }

    /// Packed form as stored at offset 0
    pub fn encode(self) -> u32 {
        encode_version(self.major as u32, self.minor as u32, self.patch as u32)
    }

    pub fn decode(packed: u32) -> Self {
        let (major, minor, patch) = decode_version(packed);
        Self { major, minor, patch }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Pack three components into a u32, lowest byte = major.
///
/// Each component is masked to 8 bits, so values above 255 do not round-trip.
pub fn encode_version(major: u32, minor: u32, patch: u32) -> u32 {
    (major & 0xFF) | ((minor & 0xFF) << 8) | ((patch & 0xFF) << 16)
}

/// Inverse of [`encode_version`]
pub fn decode_version(packed: u32) -> (u8, u8, u8) {
    let [major, minor, patch, _] = packed.to_le_bytes();
    (major, minor, patch)
}

/// Write version, key count and magic into the front of `buf`.
///
/// Caller guarantees `buf.len() >= HEADER_SIZE`. Bytes between the end of the
/// magic and `HEADER_SIZE` are left as they are (zero in a fresh buffer).
pub fn write_header(buf: &mut [u8], version: FormatVersion, key_count: u16) {
    buf[..KEY_COUNT_OFFSET].copy_from_slice(&version.encode().to_le_bytes());
    buf[KEY_COUNT_OFFSET..MAGIC_OFFSET].copy_from_slice(&key_count.to_le_bytes());
    buf[MAGIC_OFFSET..MAGIC_OFFSET + MAGIC.len()].copy_from_slice(MAGIC);
}

/// Accept `buf` as a store header only if it is long enough and both the
/// version and the magic match exactly.
pub fn validate_header(buf: &[u8]) -> bool {
    if buf.len() < HEADER_SIZE {
        return false;
    }

    let version = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if version != CURRENT_VERSION.encode() {
        return false;
    }

    &buf[MAGIC_OFFSET..MAGIC_OFFSET + MAGIC.len()] == MAGIC
}

/// Key count field of a header. Caller must have validated the header.
pub fn read_key_count(buf: &[u8]) -> u16 {
    u16::from_le_bytes([buf[KEY_COUNT_OFFSET], buf[KEY_COUNT_OFFSET + 1]])
}
