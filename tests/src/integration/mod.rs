//! # Integration Scenarios
//!
//! Each scenario runs real subsystem crates against an in-memory network
//! and asserts on what ended up stored, not on mocks.

pub mod concurrency;
pub mod failures;
pub mod properties;
