//! # fc-05-orchestrator
//!
//! Turns one feedback submission into a reward transfer.
//!
//! ## Pipeline
//!
//! ```text
//! submit ──→ claim ──→ resolve ──→ mint ×N ──→ notify ──→ publish ──→ TRANSFERRED
//!              │          │          │            │           │
//!              │          └──────────┴────────────┴───────────┴──→ FAILED / CANCELLED
//!              └── refused while CLAIMED or after TRANSFERRED
//! ```
//!
//! ## Guarantees
//!
//! | Concern | Behavior |
//! |---------|----------|
//! | Ordering | Each stage starts only after the previous one settled |
//! | Exclusivity | One submission in flight per orchestrator; the claim is atomic |
//! | Cancellation | Checked before and raced against every stage; no rollback |
//! | Resume | Checkpoints keyed by (recipient, submission id); no re-minting on retry |
//! | Isolation | The session is owned per orchestrator; independent orchestrators never share state |
//!
//! ## Example
//!
//! ```rust,ignore
//! use fc_05_orchestrator::{cancellation, FaucetApi, FaucetOrchestrator, Submission};
//!
//! let orchestrator = FaucetOrchestrator::standard(config, session);
//! let (handle, token) = cancellation::pair();
//! let receipt = orchestrator
//!     .submit(Submission::new(recipient, Rating::from_raw(5), "Great app"), token)
//!     .await?;
//! ```

pub mod adapters;
pub mod cancellation;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryCheckpointStore;
pub use cancellation::{CancelHandle, CancelToken};
pub use domain::{
    Checkpoint, CheckpointKey, FaucetError, FaucetResult, Stage, Submission, SubmissionReceipt,
    SubmissionState, SubmissionStatus, CLAIMED_MESSAGE, TRANSFERRED_MESSAGE,
};
pub use ports::{CheckpointStore, FaucetApi};
pub use service::FaucetOrchestrator;
