//! In-memory key-value storage.
//!
//! Stands in for browser local storage in tests. An optional byte quota
//! makes writes fail the way a full local storage does.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{DaybookError, Result};
use crate::storage::KeyValueStore;

/// In-memory key-value store.
///
/// Thread-safe implementation using `RwLock<HashMap>`. Values are lost when
/// the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    values: RwLock<HashMap<String, String>>,
    /// Maximum total bytes (keys + values) the store will hold.
    quota: Option<usize>,
}

impl MemoryKeyValueStore {
    /// Create a new empty in-memory store with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once `quota` bytes would be used.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }

    /// Number of keys in the store.
    pub fn len(&self) -> usize {
        self.values.read().unwrap().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values.read().unwrap().is_empty()
    }

    /// Total bytes used by keys and values.
    pub fn used_bytes(&self) -> usize {
        let values = self.values.read().unwrap();
        values.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Clear all values.
    pub fn clear(&self) {
        self.values.write().unwrap().clear();
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;

        if let Some(limit) = self.quota {
            let others: usize = values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let requested = others + key.len() + value.len();
            if requested > limit {
                return Err(DaybookError::quota_exceeded(key, requested, limit));
            }
        }

        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.remove(key);
        Ok(())
    }
}

fn poisoned() -> DaybookError {
    DaybookError::unavailable("memory store lock poisoned")
}
