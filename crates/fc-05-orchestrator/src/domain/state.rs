//! # Submission State Machine
//!
//! ```text
//! [IDLE] ──submit──→ [CLAIMED] ──all stages ok──→ [TRANSFERRED]
//!                     │    ↑
//!                     │    └──────── retry ────────┐
//!                     ├── stage error ──→ [FAILED] ─┤
//!                     └── cancel ──→ [CANCELLED] ───┘
//! ```
//!
//! `TRANSFERRED` is terminal: one claim per orchestrator.

use serde::{Deserialize, Serialize};

pub const CLAIMED_MESSAGE: &str = "One moment please...";
pub const TRANSFERRED_MESSAGE: &str = "Your reward tokens have been transferred to your wallet!";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    /// Accepting a submission.
    #[default]
    Idle,
    /// Pipeline running; further submissions are refused.
    Claimed,
    /// Tokens minted, recipient notified, feedback published.
    Transferred,
    /// A stage failed; may be retried.
    Failed,
    /// The caller cancelled; may be retried.
    Cancelled,
}

impl SubmissionState {
    pub fn can_transition_to(self, next: SubmissionState) -> bool {
        use SubmissionState::*;
        matches!(
            (self, next),
            (Idle, Claimed)
                | (Claimed, Transferred)
                | (Claimed, Failed)
                | (Claimed, Cancelled)
                | (Failed, Claimed)
                | (Cancelled, Claimed)
        )
    }

    pub fn is_terminal(self) -> bool {
        self == SubmissionState::Transferred
    }
}

/// What the UI shows: state plus a human-readable message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStatus {
    pub state: SubmissionState,
    pub message: String,
}

impl SubmissionStatus {
    pub fn new(state: SubmissionState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }
}
