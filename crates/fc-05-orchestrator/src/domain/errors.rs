//! Error types for the Transaction Orchestrator.

use super::state::SubmissionState;
use fc_01_identity_resolver::ResolutionError;
use fc_02_token_minter::MintError;
use fc_03_notification::NotificationError;
use fc_04_feedback_publisher::PublishError;
use serde::{Deserialize, Serialize};
use shared_store::AuthorizationError;
use std::fmt;
use thiserror::Error;

/// Pipeline stages, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Resolve,
    Mint,
    Notify,
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Resolve => "resolve",
            Self::Mint => "mint",
            Self::Notify => "notify",
            Self::Publish => "publish",
        })
    }
}

/// Submission failures.
#[derive(Debug, Error)]
pub enum FaucetError {
    #[error("Authorization failed: {0}")]
    Authorization(#[from] AuthorizationError),

    #[error("Could not resolve recipient: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("Minting failed: {0}")]
    Mint(#[from] MintError),

    #[error("Notification failed: {0}")]
    Notification(#[from] NotificationError),

    #[error("Feedback publication failed: {0}")]
    Publish(#[from] PublishError),

    /// The caller cancelled; `stage` did not complete.
    #[error("Submission cancelled during {stage}")]
    Cancelled { stage: Stage },

    /// Another submission holds the claim.
    #[error("A submission is already in progress")]
    SubmissionInFlight,

    /// The reward for this orchestrator was already transferred.
    #[error("Reward already claimed")]
    AlreadyClaimed,

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: SubmissionState,
        to: SubmissionState,
    },
}

impl FaucetError {
    /// Stage the failure happened in, when it came from one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Resolution(_) => Some(Stage::Resolve),
            Self::Mint(_) => Some(Stage::Mint),
            Self::Notification(_) => Some(Stage::Notify),
            Self::Publish(_) => Some(Stage::Publish),
            Self::Cancelled { stage } => Some(*stage),
            _ => None,
        }
    }
}

pub type FaucetResult<T> = Result<T, FaucetError>;
