//! # fc-02-token-minter
//!
//! Creates reward tokens. Each token is a mutable record at a fresh random
//! address holding `{owner, prev_owner}` under `coin-data`, with `Update`
//! granted to anyone so the holder can transfer it later.
//!
//! An address that is already taken is a [`MintError::Conflict`]; an
//! existing record is never overwritten.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{RandomAddressSource, ScriptedAddressSource};
pub use domain::{CoinRecord, MintError, MintResult};
pub use ports::{TokenAddressSource, TokenMintingApi};
pub use service::TokenMinter;
