//! Random identifiers.

use rand::RngCore;

/// 32 bytes from the thread-local CSPRNG.
pub fn random_bytes32() -> [u8; 32] {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes
}

/// Random 64-char hex string, used as an entry key.
pub fn random_entry_key() -> String {
    hex::encode(random_bytes32())
}
