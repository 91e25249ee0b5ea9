//! # IO Module
//!
//! Conversion layer between the domain models and the `shared` DTOs that any
//! frontend consumes. There is no transport here; a UI embeds the backend and
//! calls the dashboard service directly.

pub mod mappers;
