//! # Thanks Faucet Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Sandbox harness and session wrappers
//! └── integration/      # Cross-subsystem workflow scenarios
//!     ├── workflow.rs       # Happy paths per resolution and feedback strategy
//!     ├── failures.rs       # Stage failures and what they leave behind
//!     ├── cancellation.rs   # Cancel between and during stages
//!     ├── concurrency.rs    # Claims, independent orchestrators
//!     └── properties.rs     # Component-level guarantees
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p faucet-tests
//! cargo test -p faucet-tests integration::failures::
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
