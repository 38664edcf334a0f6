//! Cryptographic operations for Scribe.
//!
//! - `token`: API token generation and SHA-256 hashing

pub mod token;
