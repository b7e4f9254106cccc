//! # Notifier Service

use crate::domain::{NotificationError, NotificationResult, TransactionNotification};
use crate::ports::NotificationApi;
use async_trait::async_trait;
use shared_crypto::{seal, EncryptionPublicKey};
use shared_store::{NetworkSession, StoreError};
use shared_types::{FaucetConfig, RecipientInfo, TokenId};
use tracing::info;

/// Seals notifications to the recipient's encryption key and appends them to
/// the recipient's inbox.
#[derive(Clone, Debug)]
pub struct Notifier {
    message: String,
}

impl Notifier {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn from_config(config: &FaucetConfig) -> Self {
        Self::new(config.notification_message.clone())
    }
}

#[async_trait]
impl NotificationApi for Notifier {
    fn compose(&self, token_ids: &[TokenId]) -> TransactionNotification {
        TransactionNotification::compose(token_ids, self.message.as_str())
    }

    async fn deliver(
        &self,
        session: &dyn NetworkSession,
        recipient: &RecipientInfo,
        notification: &TransactionNotification,
    ) -> NotificationResult<()> {
        let key = EncryptionPublicKey::from_hex(&recipient.encryption_public_key)?;
        let sealed = seal(&key, &notification.to_json()?)?;

        let inbox = recipient.inbox;
        let tx_id = &notification.transaction_id;
        session
            .insert_entry(&inbox, tx_id.as_str(), sealed)
            .await
            .map_err(|e| match e {
                StoreError::EntryExists { .. } => NotificationError::AlreadyDelivered {
                    inbox,
                    transaction_id: tx_id.clone(),
                },
                source => NotificationError::Append { inbox, source },
            })?;

        info!(%tx_id, %inbox, coins = notification.coin_ids.len(), "Notification delivered");
        Ok(())
    }
}
