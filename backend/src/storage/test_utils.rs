//! Test utilities for file-backed storage tests
//!
//! The temporary directory lives as long as the `TestEnvironment`, so test data
//! is removed even when a test panics.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use anyhow::Result;

use super::json::{DataConnection, JsonFileStorage};

pub struct TestEnvironment {
    /// Kept alive until drop
    _temp_dir: TempDir,
    pub connection: DataConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("donation_matcher_")?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = DataConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    pub fn file_storage(&self) -> JsonFileStorage {
        JsonFileStorage::new(self.connection.clone())
    }
}

impl Drop for TestEnvironment {
    fn drop(&mut self) {
        if std::env::var("DONATION_MATCHER_DEBUG_TESTS").is_ok() {
            println!("Cleaning up test environment: {:?}", self.base_path);
        }
    }
}
