//! Error types for the Feedback Publisher.

use shared_crypto::CryptoError;
use shared_store::{ResourceKind, StoreError};
use shared_types::DataAddress;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The channel id is blank or unusable.
    #[error("Invalid feedback channel: {0}")]
    InvalidChannel(String),

    /// No service directory entry for the channel.
    #[error("Feedback channel not found: {channel_id}")]
    ChannelNotFound { channel_id: String },

    /// The mailbox does not publish an encryption key.
    #[error("Mailbox {mailbox} has no encryption key")]
    MissingEncryptionKey { mailbox: DataAddress },

    /// Nothing is published at the target profile URI.
    #[error("Feedback target not found: {uri}")]
    TargetNotFound { uri: String },

    /// The target is not a profile document.
    #[error("Feedback target {uri} is not a profile document ({kind:?})")]
    NotAProfile { uri: String, kind: ResourceKind },

    /// The target profile has no usable outbox link.
    #[error("Feedback target {uri} has no outbox")]
    MissingOutbox { uri: String },

    #[error("Feedback encryption failed: {0}")]
    Encryption(#[from] CryptoError),

    #[error("Feedback encoding failed: {0}")]
    Encoding(String),

    /// Write or lookup failure not covered above.
    #[error("Network error while publishing feedback: {0}")]
    Network(StoreError),
}

pub type PublishResult<T> = Result<T, PublishError>;
