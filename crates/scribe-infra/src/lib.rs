//! Infrastructure layer for Scribe.
//!
//! Contains implementations of the repository traits defined in `scribe-core`
//! (SQLite storage), API token hashing, and configuration loading.

pub mod config;
pub mod crypto;
pub mod sqlite;
