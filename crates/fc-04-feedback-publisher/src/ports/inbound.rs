//! # Inbound Ports

use crate::domain::{FeedbackPost, PublishResult};
use async_trait::async_trait;
use shared_store::NetworkSession;
use shared_types::DataAddress;

/// Where a feedback record ended up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishedFeedback {
    /// Mailbox or outbox the entry was appended to.
    pub collection: DataAddress,
    /// Key of the new entry.
    pub entry_key: String,
}

/// Publishes feedback to the channel the publisher was built for.
#[async_trait]
pub trait FeedbackPublisher: Send + Sync {
    async fn publish(
        &self,
        session: &dyn NetworkSession,
        feedback: &FeedbackPost,
    ) -> PublishResult<PublishedFeedback>;
}
