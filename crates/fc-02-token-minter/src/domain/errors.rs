//! Error types for the Token Minter.

use shared_store::StoreError;
use shared_types::TokenId;
use thiserror::Error;

/// Minting failures.
///
/// Every variant carries the ids of the tokens created before the failure.
/// Those records stay on the network; the caller decides what to do with
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MintError {
    /// A record already exists at the generated address.
    #[error("Token address {token} already in use ({} minted before conflict)", .minted.len())]
    Conflict {
        token: TokenId,
        minted: Vec<TokenId>,
    },

    /// Store failure other than an address conflict.
    #[error("Network error while minting ({} minted): {source}", .minted.len())]
    Network {
        source: StoreError,
        minted: Vec<TokenId>,
    },

    /// The coin record could not be serialized.
    #[error("Coin encoding failed: {reason}")]
    Encoding {
        reason: String,
        minted: Vec<TokenId>,
    },
}

impl MintError {
    /// Tokens created before the failure, in creation order.
    pub fn minted(&self) -> &[TokenId] {
        match self {
            Self::Conflict { minted, .. }
            | Self::Network { minted, .. }
            | Self::Encoding { minted, .. } => minted,
        }
    }

    /// Consume the error, keeping only the partial batch.
    pub fn into_minted(self) -> Vec<TokenId> {
        match self {
            Self::Conflict { minted, .. }
            | Self::Network { minted, .. }
            | Self::Encoding { minted, .. } => minted,
        }
    }
}

/// Result type for minting.
pub type MintResult<T> = Result<T, MintError>;
