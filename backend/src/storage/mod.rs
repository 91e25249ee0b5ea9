//! # Storage Module
//!
//! Handles all data persistence for the donation matcher.
//!
//! Persistence is a plain synchronous key-value mechanism: a string key maps to
//! a serialized blob. The donation store keeps its whole collection under a
//! single key and rewrites it on every mutation, so backends only need `get`
//! and `set`.
//!
//! ## Backends
//!
//! - **JSON files** (`json`): one file per key inside the data directory,
//!   replaced atomically on every write
//! - **Memory** (`memory`): a shared in-process map for tests and throwaway
//!   sessions
//!
//! ## Layout
//!
//! ```text
//! Donation Matcher/
//! ├── config.yaml
//! └── donations.json    ← JSON array of donation records
//! ```

pub mod traits;
pub mod json;
pub mod memory;
pub mod donation_repository;

#[cfg(test)]
pub mod test_utils;

pub use traits::{KeyValueStorage, StorageError};
pub use json::{DataConnection, JsonFileStorage};
pub use memory::MemoryStorage;
pub use donation_repository::{DonationRecord, DonationRepository, RepositoryError};
