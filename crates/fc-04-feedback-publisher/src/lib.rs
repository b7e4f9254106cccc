//! # fc-04-feedback-publisher
//!
//! Publishes a rating and comments to a feedback channel. Two strategies:
//!
//! | Strategy | Destination | Visibility |
//! |----------|-------------|------------|
//! | [`MailboxPublisher`] | Mailbox found through the channel's service directory | Sealed to the mailbox key |
//! | [`SocialPostPublisher`] | Outbox linked from a target profile | Public linked-data note |
//!
//! A publish failure never undoes earlier workflow steps.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{MailboxPublisher, SocialPostPublisher};
pub use domain::{EmailMessage, FeedbackPost, PublishError, PublishResult, ServiceLocator};
pub use ports::{FeedbackPublisher, PublishedFeedback};
pub use service::publisher_for;
