//! Ports for the Token Minter.

pub mod inbound;
pub mod outbound;

pub use inbound::TokenMintingApi;
pub use outbound::TokenAddressSource;
