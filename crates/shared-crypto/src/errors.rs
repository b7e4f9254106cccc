//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption failed
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Public key is empty, not hex, or not a curve point
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Secret key bytes are out of range
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Sealed payload shorter than its fixed header
    #[error("Sealed payload too short: {actual} bytes, need at least {minimum}")]
    TruncatedPayload {
        /// Minimum length in bytes
        minimum: usize,
        /// Actual length in bytes
        actual: usize,
    },
}
