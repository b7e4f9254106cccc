//! # Shared Types Crate
//!
//! Value types shared by the faucet subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses a subsystem boundary
//!   (addresses, token ids, recipient coordinates) is defined here.
//! - **No I/O**: this crate never talks to the network. Network access goes
//!   through the `NetworkSession` port in `shared-store`.
//! - **Explicit configuration**: record kinds, sentinels and channel ids are
//!   carried by [`FaucetConfig`] instead of scattered literals.

pub mod config;
pub mod entities;
pub mod errors;
pub mod graph;

pub use config::*;
pub use entities::*;
pub use errors::*;
pub use graph::{vocab, Graph, Term, Triple};
