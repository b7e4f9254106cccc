//! # Coin Records

use serde::{Deserialize, Serialize};

/// Contents of the `coin-data` entry of a token record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// Wallet key of the holder.
    pub owner: String,
    /// Previous holder; the minting authority sentinel for fresh tokens.
    pub prev_owner: String,
}

impl CoinRecord {
    pub fn minted(owner: impl Into<String>, authority: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            prev_owner: authority.into(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
