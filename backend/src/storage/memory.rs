use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{validate_key, KeyValueStorage, StorageError};

/// In-process key-value storage.
///
/// Clones share the same map, so a test can keep a handle and inspect what the
/// store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.lock().map_err(|_| StorageError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
