//! # Shared Crypto
//!
//! Cryptographic primitives used by the faucet subsystems.
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `sealed` | secp256k1 ECDH + XChaCha20-Poly1305 | Notifications and feedback sealed to a recipient |
//! | `symmetric` | XChaCha20-Poly1305 | AEAD layer of sealed boxes |
//! | `hashing` | SHA3-256, BLAKE3 | Network name derivation, key derivation |
//! | `random` | OS-seeded CSPRNG | Token addresses, transaction ids, entry keys |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod random;
pub mod sealed;
pub mod symmetric;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{derive_key, sha3_256};
pub use random::{random_bytes32, random_entry_key};
pub use sealed::{seal, EncryptionKeyPair, EncryptionPublicKey};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
