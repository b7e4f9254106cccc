//! # Sealed Boxes
//!
//! Anonymous public-key encryption: anyone holding a recipient's encryption
//! public key can seal a message only the recipient can open.
//!
//! ## Construction
//!
//! ```text
//! ephemeral keypair (secp256k1)
//!     │
//!     ├── ECDH(ephemeral_sk, recipient_pk) ──→ shared secret
//!     │
//!     └── BLAKE3-derive-key(context, shared ‖ ephemeral_pk ‖ recipient_pk) ──→ box key
//!
//! sealed = ephemeral_pk (33) ‖ nonce (24) ‖ XChaCha20-Poly1305(box key, plaintext)
//! ```

use crate::hashing::derive_key;
use crate::symmetric::{self, Nonce, SecretKey, NONCE_LEN};
use crate::CryptoError;
use k256::ecdh::{diffie_hellman, EphemeralSecret};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;

/// Length of a compressed SEC1 public key.
pub const PUBLIC_KEY_LEN: usize = 33;

/// Fixed header length of a sealed payload.
pub const SEALED_HEADER_LEN: usize = PUBLIC_KEY_LEN + NONCE_LEN;

const SEAL_CONTEXT: &str = "thanks-faucet sealed box v1";

/// A recipient's encryption public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncryptionPublicKey(PublicKey);

impl EncryptionPublicKey {
    /// Parse SEC1 bytes (compressed or uncompressed).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        PublicKey::from_sec1_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey("not a secp256k1 point".to_string()))
    }

    /// Parse the hex form stored on inbox records.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CryptoError::InvalidPublicKey("empty key".to_string()));
        }
        let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
        Self::from_sec1_bytes(&bytes)
    }

    /// Compressed SEC1 bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LEN] {
        let point = self.0.to_encoded_point(true);
        let mut out = [0u8; PUBLIC_KEY_LEN];
        // A compressed non-identity point is always 33 bytes.
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Lowercase hex of the compressed form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

/// A recipient's encryption key pair.
pub struct EncryptionKeyPair {
    secret: k256::SecretKey,
}

impl EncryptionKeyPair {
    /// Generate a random key pair.
    pub fn generate() -> Self {
        Self {
            secret: k256::SecretKey::random(&mut rand::thread_rng()),
        }
    }

    /// Restore from secret scalar bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let secret =
            k256::SecretKey::from_slice(&bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { secret })
    }

    /// The public half, shared with senders.
    pub fn public_key(&self) -> EncryptionPublicKey {
        EncryptionPublicKey(self.secret.public_key())
    }

    /// Open a payload produced by [`seal`] for this key pair.
    ///
    /// # Errors
    ///
    /// `TruncatedPayload` when shorter than the header, `DecryptionFailed`
    /// when sealed for another key or tampered with.
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, CryptoError> {
        if sealed.len() < SEALED_HEADER_LEN {
            return Err(CryptoError::TruncatedPayload {
                minimum: SEALED_HEADER_LEN,
                actual: sealed.len(),
            });
        }
        let (ephemeral_bytes, rest) = sealed.split_at(PUBLIC_KEY_LEN);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);

        let ephemeral = PublicKey::from_sec1_bytes(ephemeral_bytes)
            .map_err(|_| CryptoError::DecryptionFailed("bad ephemeral key".to_string()))?;
        let shared = diffie_hellman(self.secret.to_nonzero_scalar(), ephemeral.as_affine());

        let key = box_key(
            shared.raw_secret_bytes().as_slice(),
            &EncryptionPublicKey(ephemeral).to_bytes(),
            &self.public_key().to_bytes(),
        );
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);

        symmetric::decrypt(&key, ciphertext, &Nonce::from_bytes(nonce))
    }
}

/// Seal `plaintext` to `recipient`.
///
/// # Errors
///
/// Returns `CryptoError::EncryptionFailed` if the AEAD layer fails.
pub fn seal(recipient: &EncryptionPublicKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let ephemeral = EphemeralSecret::random(&mut rand::thread_rng());
    let ephemeral_pk = EncryptionPublicKey(ephemeral.public_key()).to_bytes();
    let shared = ephemeral.diffie_hellman(&recipient.0);

    let key = box_key(
        shared.raw_secret_bytes().as_slice(),
        &ephemeral_pk,
        &recipient.to_bytes(),
    );
    let (ciphertext, nonce) = symmetric::encrypt(&key, plaintext)?;

    let mut sealed = Vec::with_capacity(SEALED_HEADER_LEN + ciphertext.len());
    sealed.extend_from_slice(&ephemeral_pk);
    sealed.extend_from_slice(nonce.as_bytes());
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

fn box_key(shared: &[u8], ephemeral_pk: &[u8], recipient_pk: &[u8]) -> SecretKey {
    SecretKey::from_bytes(derive_key(SEAL_CONTEXT, &[shared, ephemeral_pk, recipient_pk]))
}
