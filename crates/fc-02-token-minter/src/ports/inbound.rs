//! # Inbound Ports

use crate::domain::MintResult;
use async_trait::async_trait;
use shared_store::NetworkSession;
use shared_types::TokenId;

/// Mints reward tokens.
#[async_trait]
pub trait TokenMintingApi: Send + Sync {
    /// Create `count` token records owned by `owner`.
    ///
    /// `count == 0` returns an empty batch without any network call. Ids
    /// come back in creation order. On failure the error carries the ids
    /// already created.
    async fn mint(
        &self,
        session: &dyn NetworkSession,
        owner: &str,
        count: usize,
    ) -> MintResult<Vec<TokenId>>;
}
