//! # JSON File Storage
//!
//! File-based key-value storage. Each key is stored as `{data_dir}/{key}.json`
//! and rewritten in full on every `set`, using a temp file plus rename so a
//! crash never leaves a half-written collection behind.

pub mod connection;
pub mod file_storage;

pub use connection::DataConnection;
pub use file_storage::JsonFileStorage;
