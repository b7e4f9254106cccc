//! # Domain Layer
//!
//! Feedback content, mailbox service naming and social-post graphs.

pub mod entities;
pub mod errors;

pub use entities::*;
pub use errors::*;
