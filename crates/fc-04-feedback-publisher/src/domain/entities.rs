//! # Feedback Content

use super::errors::{PublishError, PublishResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{record_keys, vocab, Graph, Rating, Term};

/// Subject line of feedback emails and summary of feedback posts.
pub const FEEDBACK_SUBJECT: &str = "SAFE Wallet feedback";

/// Sender label of feedback emails.
pub const FEEDBACK_SENDER_LABEL: &str = "SAFE Faucet";

/// One unit of harvested feedback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackPost {
    pub rating: Rating,
    pub comments: String,
    pub published_at: DateTime<Utc>,
}

impl FeedbackPost {
    /// Feedback stamped now.
    pub fn new(rating: Rating, comments: impl Into<String>) -> Self {
        Self {
            rating,
            comments: comments.into(),
            published_at: Utc::now(),
        }
    }

    /// Rating label followed by the comments, e.g. `[5 stars] Great app`.
    pub fn body(&self) -> String {
        let comments = self.comments.trim();
        if comments.is_empty() {
            self.rating.label()
        } else {
            format!("{} {}", self.rating.label(), comments)
        }
    }
}

/// Plaintext of a feedback email before sealing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub from: String,
    /// RFC 2822 timestamp.
    pub time: String,
    pub body: String,
}

impl EmailMessage {
    pub fn from_feedback(feedback: &FeedbackPost) -> Self {
        Self {
            subject: FEEDBACK_SUBJECT.to_string(),
            from: FEEDBACK_SENDER_LABEL.to_string(),
            time: feedback.published_at.to_rfc2822(),
            body: feedback.body(),
        }
    }
}

/// Where a mailbox channel id points in the service directory.
///
/// `"inbox.myshop"` has public id `myshop` and service name `inbox@email`;
/// a bare `"myshop"` has service name `@email`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceLocator {
    pub public_id: String,
    pub service_name: String,
}

impl ServiceLocator {
    pub fn parse(channel_id: &str) -> PublishResult<Self> {
        let trimmed = channel_id.trim().trim_end_matches('.');
        let (service_id, public_id) = match trimmed.rsplit_once('.') {
            Some((service, public)) => (service, public),
            None => ("", trimmed),
        };
        if public_id.is_empty() {
            return Err(PublishError::InvalidChannel(channel_id.to_string()));
        }
        Ok(Self {
            public_id: public_id.to_string(),
            service_name: format!("{}{}", service_id, record_keys::EMAIL_SERVICE_SUFFIX),
        })
    }
}

/// Activity-stream note for `feedback`, attributed to `sender_uri`.
pub fn post_graph(post_uri: &str, sender_uri: &str, feedback: &FeedbackPost) -> Graph {
    Graph::new()
        .with(post_uri, vocab::RDF_TYPE, Term::iri(vocab::AS_NOTE))
        .with(post_uri, vocab::AS_ATTRIBUTED_TO, Term::iri(sender_uri))
        .with(post_uri, vocab::AS_SUMMARY, Term::literal(FEEDBACK_SUBJECT))
        .with(
            post_uri,
            vocab::AS_PUBLISHED,
            Term::literal(feedback.published_at.to_rfc3339()),
        )
        .with(post_uri, vocab::AS_CONTENT, Term::literal(feedback.body()))
}
