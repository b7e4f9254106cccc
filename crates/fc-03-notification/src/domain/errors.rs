//! Error types for the Notification Composer.

use shared_crypto::CryptoError;
use shared_store::StoreError;
use shared_types::{DataAddress, TransactionId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// Missing or invalid recipient encryption key, or sealing failed.
    #[error("Notification encryption failed: {0}")]
    Encryption(#[from] CryptoError),

    /// The inbox refused the entry (absent, permission denied, connection).
    #[error("Append to inbox {inbox} failed: {source}")]
    Append {
        inbox: DataAddress,
        source: StoreError,
    },

    /// An entry with this transaction id is already in the inbox.
    #[error("Transaction {transaction_id} already delivered to {inbox}")]
    AlreadyDelivered {
        inbox: DataAddress,
        transaction_id: TransactionId,
    },

    /// The notification could not be serialized or parsed.
    #[error("Notification encoding failed: {0}")]
    Encoding(String),
}

pub type NotificationResult<T> = Result<T, NotificationError>;
