//! Key-value storage for Daybook.
//!
//! This module provides the storage medium the entry store persists into,
//! with file-based and in-memory backends.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use traits::KeyValueStore;
