//! # Faucet Configuration
//!
//! Typed replacement for the record kinds, sentinels and channel ids every
//! subsystem needs. Components take the values they use at construction.

use crate::entities::TypeTag;
use serde::{Deserialize, Serialize};

/// Entry keys of the well-known records the faucet reads and writes.
pub mod record_keys {
    /// Coin record entry holding `{owner, prev_owner}`.
    pub const COIN_DATA: &str = "coin-data";
    /// Wallet owner key exposed by a transaction inbox.
    pub const INBOX_WALLET_PK: &str = "__wallet_pk";
    /// Encryption key exposed by a transaction inbox.
    pub const INBOX_ENC_PK: &str = "__tx_enc_pk";
    /// Encryption key exposed by an email mailbox.
    pub const EMAIL_ENC_PK: &str = "__email_enc_pk";
    /// Suffix appended to a service id to form its DNS entry key.
    pub const EMAIL_SERVICE_SUFFIX: &str = "@email";
}

/// Default number of tokens minted per submission.
pub const DEFAULT_REWARD_COUNT: usize = 6;
/// Record kind of reward token records.
pub const DEFAULT_COIN_TYPE_TAG: TypeTag = 21_082_018;
/// Record kind of wallet transaction inboxes.
pub const DEFAULT_INBOX_TYPE_TAG: TypeTag = 20_082_018;
/// Record kind of public-id service directories.
pub const DEFAULT_DNS_TYPE_TAG: TypeTag = 15_001;
/// Previous-owner sentinel written into freshly minted tokens.
pub const DEFAULT_MINTING_AUTHORITY: &str = "GENESIS";
/// Feedback mailbox the faucet reports to.
pub const DEFAULT_FEEDBACK_CHANNEL: &str = "safewalletfeedback";

/// Where harvested feedback is published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum FeedbackChannel {
    /// Encrypted email-like object appended to a mailbox found via the
    /// service directory of `channel_id`.
    Mailbox { channel_id: String },
    /// Public post added to the outbox of the profile at `target_uri`,
    /// attributed to `sender_uri`.
    SocialPost {
        target_uri: String,
        sender_uri: String,
    },
}

impl Default for FeedbackChannel {
    fn default() -> Self {
        Self::Mailbox {
            channel_id: DEFAULT_FEEDBACK_CHANNEL.to_string(),
        }
    }
}

/// How recipient identifiers are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategy {
    /// Raw keys and profile-document URIs.
    #[default]
    Profile,
    /// Raw keys only.
    RawKey,
}

/// Faucet configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaucetConfig {
    /// Tokens minted per submission.
    pub reward_count: usize,
    /// Record kind of token records.
    pub coin_type_tag: TypeTag,
    /// Record kind of transaction inboxes.
    pub inbox_type_tag: TypeTag,
    /// Record kind of service directories.
    pub dns_type_tag: TypeTag,
    /// Previous-owner sentinel of minted tokens.
    pub minting_authority: String,
    /// Message carried by transaction notifications.
    pub notification_message: String,
    /// Token creations in flight at once (1 = strictly sequential).
    pub mint_concurrency: usize,
    /// Feedback destination.
    pub feedback: FeedbackChannel,
    /// Recipient resolution strategy.
    pub resolution: ResolutionStrategy,
}

impl Default for FaucetConfig {
    fn default() -> Self {
        Self {
            reward_count: DEFAULT_REWARD_COUNT,
            coin_type_tag: DEFAULT_COIN_TYPE_TAG,
            inbox_type_tag: DEFAULT_INBOX_TYPE_TAG,
            dns_type_tag: DEFAULT_DNS_TYPE_TAG,
            minting_authority: DEFAULT_MINTING_AUTHORITY.to_string(),
            notification_message: "In exchange for your feedback!".to_string(),
            mint_concurrency: 1,
            feedback: FeedbackChannel::default(),
            resolution: ResolutionStrategy::default(),
        }
    }
}

impl FaucetConfig {
    /// Configuration for testing (fewer tokens).
    pub fn for_testing() -> Self {
        Self {
            reward_count: 3,
            ..Self::default()
        }
    }
}
