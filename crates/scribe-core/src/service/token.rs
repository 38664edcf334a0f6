//! TokenIssuer trait for API token generation and hashing.
//!
//! Defined in scribe-core so the user service can mint and verify tokens
//! without coupling to a specific RNG or digest. The `Sha256TokenIssuer`
//! adapter lives in scribe-infra.

/// Abstraction over API token minting and hashing.
///
/// Only hashes are persisted; the plaintext token is shown to the user once.
pub trait TokenIssuer: Send + Sync {
    /// Produce a fresh random token.
    fn generate_token(&self) -> String;

    /// Compute the hex-encoded hash stored for a token.
    fn hash_token(&self, token: &str) -> String;
}
