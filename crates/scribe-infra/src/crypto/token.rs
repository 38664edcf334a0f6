//! API token minting and SHA-256 hashing.
//!
//! Implements the `TokenIssuer` trait from `scribe-core` using the OS RNG
//! and the `sha2` crate (RustCrypto ecosystem).

use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

use scribe_core::service::token::TokenIssuer;

/// Prefix that makes Scribe tokens easy to spot in logs and config files.
pub const TOKEN_PREFIX: &str = "scb_";

/// Random 32-byte tokens, stored as lowercase hex SHA-256 digests.
pub struct Sha256TokenIssuer;

impl Sha256TokenIssuer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for Sha256TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenIssuer for Sha256TokenIssuer {
    fn generate_token(&self) -> String {
        let mut key_bytes = [0u8; 32];
        OsRng.fill_bytes(&mut key_bytes);
        format!(
            "{TOKEN_PREFIX}{}",
            key_bytes.iter().map(|b| format!("{b:02x}")).collect::<String>()
        )
    }

    fn hash_token(&self, token: &str) -> String {
        let digest = Sha256::digest(token.as_bytes());
        format!("{:x}", digest)
    }
}
