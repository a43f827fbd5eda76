//! In-memory storage fake
//!
//! Backs the stores in tests. An optional byte cap over all stored values
//! makes the quota-exhaustion path reproducible without filling a disk.

use std::collections::HashMap;
use std::sync::Mutex;

use super::error::{StorageError, StorageResult};
use super::StoragePort;

/// HashMap-backed storage with an optional capacity cap
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryStorage {
    /// Create an unbounded in-memory storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the total stored bytes; a `set` that would exceed the cap fails
    /// with a capacity error and leaves the stored value untouched
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl StoragePort for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.lock();
        if let Some(capacity) = self.capacity {
            let current: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(_, v)| v.len())
                .sum();
            if current + value.len() > capacity {
                return Err(StorageError::CapacityExceeded {
                    key: key.to_string(),
                });
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}
