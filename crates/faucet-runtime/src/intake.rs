//! # Line Intake
//!
//! One JSON object per input line stands in for the feedback form:
//!
//! ```json
//! {"recipient": "safe://alice#me", "rating": 5, "comments": "Great app"}
//! ```
//!
//! `submission_id` may be given to retry an earlier submission. Each line
//! yields one [`SubmissionOutcome`] JSON line.

use fc_05_orchestrator::{FaucetError, Submission, SubmissionReceipt, SubmissionStatus};
use serde::{Deserialize, Serialize};
use shared_types::Rating;
use uuid::Uuid;

/// A parsed input line.
#[derive(Clone, Debug, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub submission_id: Option<Uuid>,
    pub recipient: String,
    /// Raw widget value; outside 0-5 means no rating.
    #[serde(default)]
    pub rating: Option<i64>,
    #[serde(default)]
    pub comments: String,
}

impl SubmissionRequest {
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    pub fn into_submission(self) -> Submission {
        let rating = self.rating.map_or(Rating::none(), Rating::from_raw);
        let mut submission = Submission::new(self.recipient, rating, self.comments);
        if let Some(id) = self.submission_id {
            submission.submission_id = id;
        }
        submission
    }
}

/// Result line written for each request.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<Uuid>,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<SubmissionReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionOutcome {
    pub fn completed(
        submission_id: Uuid,
        status: SubmissionStatus,
        result: Result<SubmissionReceipt, FaucetError>,
    ) -> Self {
        match result {
            Ok(receipt) => Self {
                submission_id: Some(submission_id),
                status,
                receipt: Some(receipt),
                error: None,
            },
            Err(e) => Self {
                submission_id: Some(submission_id),
                status,
                receipt: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// The line could not be parsed.
    pub fn rejected(status: SubmissionStatus, reason: impl Into<String>) -> Self {
        Self {
            submission_id: None,
            status,
            receipt: None,
            error: Some(reason.into()),
        }
    }

    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e))
    }
}
