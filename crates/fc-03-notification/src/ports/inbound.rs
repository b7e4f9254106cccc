//! # Inbound Ports

use crate::domain::{NotificationResult, TransactionNotification};
use async_trait::async_trait;
use shared_store::NetworkSession;
use shared_types::{RecipientInfo, TokenId, TransactionId};

/// Builds and delivers transaction notifications.
///
/// Composition and delivery are separate so a composed notification can be
/// checkpointed and re-delivered under the same transaction id.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Build a notification for `token_ids` with a fresh transaction id.
    fn compose(&self, token_ids: &[TokenId]) -> TransactionNotification;

    /// Seal `notification` to the recipient and append it to their inbox
    /// under its transaction id. Never updates an existing entry.
    async fn deliver(
        &self,
        session: &dyn NetworkSession,
        recipient: &RecipientInfo,
        notification: &TransactionNotification,
    ) -> NotificationResult<()>;

    /// Compose and deliver in one step.
    async fn notify(
        &self,
        session: &dyn NetworkSession,
        recipient: &RecipientInfo,
        token_ids: &[TokenId],
    ) -> NotificationResult<TransactionId> {
        let notification = self.compose(token_ids);
        self.deliver(session, recipient, &notification).await?;
        Ok(notification.transaction_id)
    }
}
