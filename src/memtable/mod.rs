//! MemTable Module
//!
//! In-memory ordered index backing a store handle.
//!
//! ## Responsibilities
//! - Hold set-but-unsaved pairs for a writable store
//! - Memoize records found by disk scan for a readonly store
//! - Ordered iteration for `save` (ascending key order)
//! - Track the encoded size so `save` can check capacity up front
//!
//! ## Data Structure Choice
//! A plain BTreeMap: ordered keys give a deterministic on-disk layout.
//! Locking is the owning handle's job, so the table itself is not shared.

mod table;

pub use table::MemTable;
