//! Ports for the Feedback Publisher.

pub mod inbound;

pub use inbound::{FeedbackPublisher, PublishedFeedback};
