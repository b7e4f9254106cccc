//! # fc-03-notification
//!
//! Tells a recipient which tokens were minted for them. A
//! [`TransactionNotification`] is serialized to JSON, sealed to the
//! recipient's encryption key and appended to their inbox under a fresh
//! transaction id. Existing inbox entries are never touched.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{NotificationError, NotificationResult, TransactionNotification};
pub use ports::NotificationApi;
pub use service::Notifier;
