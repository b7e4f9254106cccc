//! # Transaction Notifications
//!
//! The plaintext record a wallet finds in its inbox after decryption:
//!
//! ```json
//! {"txId": "…", "coinIds": ["…", "…"], "msg": "…", "date": "Tue, 1 Jul 2025 10:52:37 +0000"}
//! ```

use super::errors::{NotificationError, NotificationResult};
use serde::{Deserialize, Serialize};
use shared_crypto::{random_entry_key, EncryptionKeyPair};
use shared_types::{TokenId, TransactionId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionNotification {
    /// Also the inbox entry key.
    #[serde(rename = "txId")]
    pub transaction_id: TransactionId,
    #[serde(rename = "coinIds")]
    pub coin_ids: Vec<TokenId>,
    pub msg: String,
    /// RFC 2822 timestamp.
    pub date: String,
}

impl TransactionNotification {
    /// New notification with a fresh transaction id, stamped now.
    pub fn compose(coin_ids: &[TokenId], msg: impl Into<String>) -> Self {
        Self {
            transaction_id: TransactionId::new(random_entry_key()),
            coin_ids: coin_ids.to_vec(),
            msg: msg.into(),
            date: chrono::Utc::now().to_rfc2822(),
        }
    }

    pub fn to_json(&self) -> NotificationResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| NotificationError::Encoding(e.to_string()))
    }

    /// Decrypt and parse an inbox entry with the recipient's key pair.
    pub fn open(keys: &EncryptionKeyPair, sealed: &[u8]) -> NotificationResult<Self> {
        let plaintext = keys.open(sealed)?;
        serde_json::from_slice(&plaintext).map_err(|e| NotificationError::Encoding(e.to_string()))
    }
}
