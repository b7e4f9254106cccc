//! Feedback channel strategies.

pub mod mailbox;
pub mod social;

pub use mailbox::MailboxPublisher;
pub use social::SocialPostPublisher;
