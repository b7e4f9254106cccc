//! # fc-01-identity-resolver
//!
//! Maps a human-supplied recipient identifier to the coordinates a
//! notification is delivered to.
//!
//! ## Resolution Paths
//!
//! ```text
//! "ab12…" (64 hex) ──SHA3──→ inbox address ─┐
//!                                           ├──→ read __wallet_pk, __tx_enc_pk ──→ RecipientInfo
//! "safe://…#me" ──fetch──→ profile graph ───┘
//!                            │
//!                            ├── ldp:inbox link
//!                            └── legacy xorName + typeTag
//! ```
//!
//! A profile without either link is a terminal failure. Only transient
//! connection errors are retryable.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{raw_key_inbox, RecipientIdentifier, ResolutionError, ResolutionResult};
pub use ports::RecipientResolver;
pub use service::{resolver_for, ProfileResolver, RawKeyResolver};
