//! # Faucet Runtime Library
//!
//! Exposes the runtime modules for testing. The entry point is the
//! `main.rs` binary.
//!
//! - `config` - environment configuration
//! - `logging` - tracing subscriber setup
//! - `container` - authorisation bootstrap and orchestrator wiring
//! - `intake` - line-oriented submission requests and outcomes
//! - `sandbox` - local in-memory network provisioning

#![allow(clippy::type_complexity)]

pub mod config;
pub mod container;
pub mod intake;
pub mod logging;
pub mod sandbox;

pub use config::RuntimeConfig;
pub use container::FaucetContainer;
pub use intake::{SubmissionOutcome, SubmissionRequest};
pub use sandbox::{ProfileLink, ProvisionedChannel, ProvisionedWallet, Sandbox};
