//! # Domain Layer
//!
//! Submission state machine, submissions, receipts and checkpoints.

pub mod entities;
pub mod errors;
pub mod state;

pub use entities::*;
pub use errors::*;
pub use state::*;
