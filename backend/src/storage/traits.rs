//! # Storage Traits
//!
//! This module defines the storage abstraction that lets the donation store
//! run on top of any key-value backend without modification.

use std::path::PathBuf;

/// Errors raised by key-value backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StorageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Trait defining a synchronous string-keyed blob store
///
/// Values are opaque to the backend; callers decide the encoding.
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if nothing was ever written
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Keys double as file names, so they are limited to a safe character set.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
