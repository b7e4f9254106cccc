//! # Hashing
//!
//! SHA3-256 for network name derivation, BLAKE3 for key derivation.

use sha3::{Digest, Sha3_256};

/// 256-bit hash output.
pub type Hash = [u8; 32];

/// SHA3-256 of `data`.
///
/// This is the network's naming hash: deterministic inbox addresses and
/// immutable blob names are derived with it.
pub fn sha3_256(data: &[u8]) -> Hash {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive a 32-byte key from a context string and input key material.
///
/// Each element of `key_material` is fed to the hasher in order.
pub fn derive_key(context: &str, key_material: &[&[u8]]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new_derive_key(context);
    for part in key_material {
        hasher.update(part);
    }
    *hasher.finalize().as_bytes()
}
