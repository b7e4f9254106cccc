//! # Submissions, Receipts and Checkpoints

use fc_03_notification::TransactionNotification;
use serde::{Deserialize, Serialize};
use shared_types::{DataAddress, Rating, RecipientInfo, TokenId, TransactionId};
use uuid::Uuid;

/// One user submission.
///
/// Re-submitting a value with the same `submission_id` resumes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub submission_id: Uuid,
    pub recipient: String,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub comments: String,
}

impl Submission {
    /// New submission with a fresh id.
    pub fn new(recipient: impl Into<String>, rating: Rating, comments: impl Into<String>) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            recipient: recipient.into(),
            rating,
            comments: comments.into(),
        }
    }
}

/// Outcome of a completed submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    /// Normalized recipient identifier.
    pub recipient: String,
    pub inbox: DataAddress,
    pub token_ids: Vec<TokenId>,
    pub transaction_id: TransactionId,
}

/// Identifies a submission's progress record.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CheckpointKey {
    pub recipient: String,
    pub submission_id: Uuid,
}

impl CheckpointKey {
    pub fn new(recipient: impl Into<String>, submission_id: Uuid) -> Self {
        Self {
            recipient: recipient.into(),
            submission_id,
        }
    }
}

/// Progress of one submission through the pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checkpoint {
    pub recipient: Option<RecipientInfo>,
    /// Tokens created so far, including partial batches.
    pub minted: Vec<TokenId>,
    /// Composed before the first delivery attempt and reused afterwards.
    pub notification: Option<TransactionNotification>,
    pub notified: bool,
    pub published: bool,
}

impl Checkpoint {
    /// Whether any remote effect has been recorded.
    pub fn has_progress(&self) -> bool {
        self.recipient.is_some() || !self.minted.is_empty() || self.notification.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.notified && self.published
    }
}
