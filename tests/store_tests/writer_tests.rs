//! Tests for the writable store
//!
//! These tests verify:
//! - Open mode selection on a new file
//! - Set/overwrite semantics
//! - Save layout, idempotence and capacity bound
//! - Close lifecycle

use std::fs;
use std::path::PathBuf;

use fixedkv::format::{read_key_count, validate_header, HEADER_SIZE};
use fixedkv::{Config, FixedKv, FixedKvError, Mode, ReadView};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("test.db");
    (temp_dir, path)
}

fn open_new(path: &PathBuf) -> FixedKv {
    let kv = FixedKv::open(path).unwrap();
    assert_eq!(kv.mode(), Mode::Writable);
    kv
}

// =============================================================================
// Open Tests
// =============================================================================

#[test]
fn test_open_creates_file_writable() {
    let (_temp, path) = setup_temp_store();

    let kv = FixedKv::open(&path).unwrap();

    assert!(path.exists());
    assert!(!kv.is_readonly());
    assert!(kv.is_empty());
    assert_eq!(kv.path(), path.as_path());
}

#[test]
fn test_open_existing_empty_file_is_writable() {
    let (_temp, path) = setup_temp_store();
    fs::write(&path, b"").unwrap();

    let kv = FixedKv::open(&path).unwrap();
    assert_eq!(kv.mode(), Mode::Writable);
}

#[test]
fn test_open_missing_without_create_fails() {
    let (_temp, path) = setup_temp_store();
    let config = Config::builder().create_if_missing(false).build();

    let result = FixedKv::open_with_config(&path, config);

    assert!(matches!(result, Err(FixedKvError::Io(_))));
    assert!(!path.exists());
}

#[test]
fn test_open_short_garbage_file_is_invalid() {
    let (_temp, path) = setup_temp_store();
    fs::write(&path, b"not a store").unwrap();

    let result = FixedKv::open(&path);
    assert!(matches!(result, Err(FixedKvError::InvalidHeader(_))));
}

#[test]
fn test_version_string() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    assert_eq!(kv.version().to_string(), "v1.0.0");
    assert_eq!(ReadView::version(&kv).to_string(), "v1.0.0");
}

// =============================================================================
// Set Tests
// =============================================================================

#[test]
fn test_set_new_key_returns_none() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    assert_eq!(kv.set(b"key1", b"value1").unwrap(), None);
    assert_eq!(kv.len(), 1);
}

#[test]
fn test_set_overwrite_returns_previous() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.set(b"key1", b"v1").unwrap();
    let previous = kv.set(b"key1", b"v2").unwrap();

    assert_eq!(previous, Some(b"v1".to_vec()));
    assert_eq!(kv.get(b"key1").unwrap(), Some(b"v2".to_vec()));
    assert_eq!(kv.len(), 1);
}

#[test]
fn test_set_does_not_touch_disk() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.set(b"key1", b"value1").unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
}

#[test]
fn test_set_rejects_oversize_key() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);
    let key = vec![b'k'; u16::MAX as usize + 1];

    let result = kv.set(&key, b"v");

    assert!(matches!(result, Err(FixedKvError::KeyTooLarge(n)) if n == key.len()));
    assert!(kv.is_empty());
}

#[test]
fn test_set_rejects_oversize_value() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);
    let value = vec![0u8; u16::MAX as usize + 1];

    assert!(matches!(kv.set(b"k", &value), Err(FixedKvError::ValueTooLarge(_))));
}

// =============================================================================
// Get Tests
// =============================================================================

#[test]
fn test_get_unsaved_entries() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.set(b"key1", b"value1").unwrap();
    kv.set(b"empty", b"").unwrap();
    kv.set(b"binary", &[0x00, 0x01, 0x02, 0x03]).unwrap();

    assert_eq!(kv.get(b"key1").unwrap(), Some(b"value1".to_vec()));
    assert_eq!(kv.get(b"empty").unwrap(), Some(Vec::new()));
    assert_eq!(kv.get(b"binary").unwrap(), Some(vec![0x00, 0x01, 0x02, 0x03]));
    assert_eq!(kv.get(b"nonexistent").unwrap(), None);
}

#[test]
fn test_get_after_save_still_served() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.set(b"key1", b"value1").unwrap();
    kv.save().unwrap();

    assert_eq!(kv.get(b"key1").unwrap(), Some(b"value1".to_vec()));
    assert_eq!(kv.get(b"missing").unwrap(), None);
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_writes_header_and_records() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.set(b"B", b"BB").unwrap();
    kv.set(b"A", b"Aa").unwrap();
    kv.save().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(validate_header(&bytes));
    assert_eq!(read_key_count(&bytes), 2);
    // Records follow in ascending key order
    assert_eq!(&bytes[HEADER_SIZE..], b"\x01\x00\x02\x00AAa\x01\x00\x02\x00BBB");
}

#[test]
fn test_save_empty_store_writes_header_only() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.save().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(read_key_count(&bytes), 0);
}

#[test]
fn test_save_twice_is_byte_identical() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.set(b"A", b"Aa").unwrap();
    kv.set(b"C", b"CCC").unwrap();
    kv.save().unwrap();
    let first = fs::read(&path).unwrap();

    kv.save().unwrap();
    let second = fs::read(&path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_resave_with_shorter_value_leaves_no_tail() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.set(b"key", b"a fairly long value").unwrap();
    kv.save().unwrap();

    kv.set(b"key", b"x").unwrap();
    kv.save().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), HEADER_SIZE + 4 + 3 + 1);
}

#[test]
fn test_save_over_capacity_fails() {
    let (_temp, path) = setup_temp_store();
    let config = Config::builder().capacity(HEADER_SIZE + 10).build();
    let kv = FixedKv::open_with_config(&path, config).unwrap();

    kv.set(b"key", b"abc").unwrap(); // 10 bytes, fits exactly
    kv.save().unwrap();

    kv.set(b"k2", b"").unwrap();
    let result = kv.save();

    assert!(matches!(
        result,
        Err(FixedKvError::StoreFull { needed, capacity })
            if needed == HEADER_SIZE + 16 && capacity == HEADER_SIZE + 10
    ));
    // The previous image is untouched
    assert_eq!(fs::metadata(&path).unwrap().len(), (HEADER_SIZE + 10) as u64);
}

#[test]
fn test_capacity_never_below_header() {
    let config = Config::builder().capacity(1).build();
    assert_eq!(config.capacity, HEADER_SIZE);
}

#[test]
fn test_save_too_many_keys_fails() {
    let (_temp, path) = setup_temp_store();
    let config = Config::builder().capacity(usize::MAX).build();
    let kv = FixedKv::open_with_config(&path, config).unwrap();

    for i in 0..=u16::MAX as u32 {
        kv.set(&i.to_be_bytes(), b"").unwrap();
    }

    assert!(matches!(kv.save(), Err(FixedKvError::TooManyKeys(n)) if n == 65536));
}

// =============================================================================
// Close Tests
// =============================================================================

#[test]
fn test_close_twice_fails() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.close().unwrap();
    assert!(matches!(kv.close(), Err(FixedKvError::Closed)));
}

#[test]
fn test_operations_after_close_fail() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);
    kv.set(b"key1", b"value1").unwrap();

    kv.close().unwrap();

    assert!(matches!(kv.set(b"k", b"v"), Err(FixedKvError::Closed)));
    assert!(matches!(kv.get(b"key1"), Err(FixedKvError::Closed)));
    assert!(matches!(kv.save(), Err(FixedKvError::Closed)));
}

#[test]
fn test_close_without_save_discards_entries() {
    let (_temp, path) = setup_temp_store();
    let kv = open_new(&path);

    kv.set(b"key1", b"value1").unwrap();
    kv.close().unwrap();

    assert_eq!(fs::metadata(&path).unwrap().len(), 0);
    // Still empty, so reopening gives a fresh writable store
    let reopened = FixedKv::open(&path).unwrap();
    assert_eq!(reopened.mode(), Mode::Writable);
    assert_eq!(reopened.get(b"key1").unwrap(), None);
}
