use log::debug;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use super::connection::DataConnection;
use crate::storage::traits::{validate_key, KeyValueStorage, StorageError};

/// Key-value storage backed by one JSON file per key
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    connection: DataConnection,
}

impl JsonFileStorage {
    pub fn new(connection: DataConnection) -> Self {
        Self { connection }
    }

    /// Get the file path backing `key`
    pub fn entry_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.connection.base_directory().join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.entry_path(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.entry_path(key)?;
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            fs::create_dir_all(base_dir).map_err(|e| StorageError::io(base_dir, e))?;
        }

        // Write to a temp file first, then atomically replace the existing file
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(|e| StorageError::io(&temp_path, e))?;
        fs::rename(&temp_path, &path).map_err(|e| StorageError::io(&path, e))?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_utils::TestEnvironment;

    #[test]
    fn test_get_missing_key_returns_none() {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let storage = env.file_storage();

        assert_eq!(storage.get("donations").expect("get failed"), None);
    }

    #[test]
    fn test_set_then_get() {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let storage = env.file_storage();

        storage.set("donations", "[]").expect("set failed");
        storage.set("donations", "[1]").expect("second set failed");

        assert_eq!(storage.get("donations").expect("get failed").as_deref(), Some("[1]"));
        assert!(env.base_directory().join("donations.json").exists());
        assert!(!env.base_directory().join("donations.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let env = TestEnvironment::new().expect("Failed to create test environment");
        let storage = env.file_storage();

        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(matches!(storage.get("a/b"), Err(StorageError::InvalidKey(_))));
    }
}
