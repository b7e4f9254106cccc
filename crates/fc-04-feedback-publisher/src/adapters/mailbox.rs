//! # Mailbox Strategy
//!
//! ```text
//! channel id ──split──→ public id, service name
//!     SHA3(public id) @ dns tag ──get(service name)──→ mailbox address
//!     mailbox ──get(__email_enc_pk)──→ key
//!     seal(email JSON) ──put_immutable──→ blob name
//!     seal(blob name) ──insert(random key)──→ mailbox
//! ```

use crate::domain::{EmailMessage, FeedbackPost, PublishError, PublishResult, ServiceLocator};
use crate::ports::{FeedbackPublisher, PublishedFeedback};
use async_trait::async_trait;
use shared_crypto::{random_entry_key, seal, sha3_256, EncryptionPublicKey};
use shared_store::{NetworkSession, StoreError};
use shared_types::{record_keys, DataAddress, TypeTag, XorName};
use tracing::{debug, info};

/// Sends feedback as an encrypted email to a named mailbox.
#[derive(Clone, Debug)]
pub struct MailboxPublisher {
    channel_id: String,
    dns_type_tag: TypeTag,
}

impl MailboxPublisher {
    pub fn new(channel_id: impl Into<String>, dns_type_tag: TypeTag) -> Self {
        Self {
            channel_id: channel_id.into(),
            dns_type_tag,
        }
    }

    /// Address of the service directory of `public_id`.
    pub fn services_address(public_id: &str, dns_type_tag: TypeTag) -> DataAddress {
        DataAddress::new(XorName::new(sha3_256(public_id.as_bytes())), dns_type_tag)
    }

    async fn locate_mailbox(&self, session: &dyn NetworkSession) -> PublishResult<DataAddress> {
        let locator = ServiceLocator::parse(&self.channel_id)?;
        let services = Self::services_address(&locator.public_id, self.dns_type_tag);

        let serialized = session
            .get_entry(&services, &locator.service_name)
            .await
            .map_err(|e| match e {
                StoreError::NoSuchData { .. } | StoreError::NoSuchEntry { .. } => {
                    PublishError::ChannelNotFound {
                        channel_id: self.channel_id.clone(),
                    }
                }
                other => PublishError::Network(other),
            })?;

        serde_json::from_slice(&serialized).map_err(|e| {
            PublishError::InvalidChannel(format!("{}: bad service entry: {}", self.channel_id, e))
        })
    }

    async fn mailbox_key(
        &self,
        session: &dyn NetworkSession,
        mailbox: DataAddress,
    ) -> PublishResult<EncryptionPublicKey> {
        let bytes = session
            .get_entry(&mailbox, record_keys::EMAIL_ENC_PK)
            .await
            .map_err(|e| match e {
                StoreError::NoSuchEntry { .. } => PublishError::MissingEncryptionKey { mailbox },
                other => PublishError::Network(other),
            })?;
        let hex = String::from_utf8(bytes).map_err(|_| PublishError::MissingEncryptionKey { mailbox })?;
        Ok(EncryptionPublicKey::from_hex(&hex)?)
    }
}

#[async_trait]
impl FeedbackPublisher for MailboxPublisher {
    async fn publish(
        &self,
        session: &dyn NetworkSession,
        feedback: &FeedbackPost,
    ) -> PublishResult<PublishedFeedback> {
        let mailbox = self.locate_mailbox(session).await?;
        let key = self.mailbox_key(session, mailbox).await?;

        let email = serde_json::to_vec(&EmailMessage::from_feedback(feedback))
            .map_err(|e| PublishError::Encoding(e.to_string()))?;
        let blob = session
            .put_immutable(seal(&key, &email)?)
            .await
            .map_err(PublishError::Network)?;
        debug!(%blob, "Feedback email stored");

        let entry_key = random_entry_key();
        let pointer = seal(&key, blob.to_hex().as_bytes())?;
        session
            .insert_entry(&mailbox, &entry_key, pointer)
            .await
            .map_err(PublishError::Network)?;

        info!(channel = %self.channel_id, %mailbox, "Feedback sent to mailbox");
        Ok(PublishedFeedback {
            collection: mailbox,
            entry_key,
        })
    }
}
