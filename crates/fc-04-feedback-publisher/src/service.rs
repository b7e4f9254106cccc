//! # Publisher Selection

use crate::adapters::{MailboxPublisher, SocialPostPublisher};
use crate::ports::FeedbackPublisher;
use shared_types::{FaucetConfig, FeedbackChannel};
use std::sync::Arc;

/// Build the publisher for the configured feedback channel.
pub fn publisher_for(config: &FaucetConfig) -> Arc<dyn FeedbackPublisher> {
    match &config.feedback {
        FeedbackChannel::Mailbox { channel_id } => {
            Arc::new(MailboxPublisher::new(channel_id.clone(), config.dns_type_tag))
        }
        FeedbackChannel::SocialPost {
            target_uri,
            sender_uri,
        } => Arc::new(SocialPostPublisher::new(target_uri.clone(), sender_uri.clone())),
    }
}
