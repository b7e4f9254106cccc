//! # Token Minter Service
//!
//! Creates `count` independent coin records. With `concurrency == 1` tokens
//! are created one at a time and the first failure stops the batch. With a
//! larger limit up to `concurrency` creations are in flight and every
//! attempt settles before the result is reported.

use crate::adapters::RandomAddressSource;
use crate::domain::{CoinRecord, MintError, MintResult};
use crate::ports::{TokenAddressSource, TokenMintingApi};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use shared_store::{NetworkSession, StoreError};
use shared_types::{
    record_keys, Action, DataAddress, FaucetConfig, Grantee, PermissionSet, TokenId, TypeTag,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Failure of a single token creation, before the batch context is attached.
enum TokenFailure {
    Conflict(TokenId),
    Network(StoreError),
    Encoding(String),
}

impl TokenFailure {
    fn with_minted(self, minted: Vec<TokenId>) -> MintError {
        match self {
            Self::Conflict(token) => MintError::Conflict { token, minted },
            Self::Network(source) => MintError::Network { source, minted },
            Self::Encoding(reason) => MintError::Encoding { reason, minted },
        }
    }
}

/// Mints reward tokens as independently addressed mutable records.
pub struct TokenMinter {
    coin_type_tag: TypeTag,
    minting_authority: String,
    concurrency: usize,
    addresses: Arc<dyn TokenAddressSource>,
}

impl TokenMinter {
    /// Minter with random addresses.
    pub fn new(coin_type_tag: TypeTag, minting_authority: impl Into<String>) -> Self {
        Self {
            coin_type_tag,
            minting_authority: minting_authority.into(),
            concurrency: 1,
            addresses: Arc::new(RandomAddressSource),
        }
    }

    pub fn from_config(config: &FaucetConfig) -> Self {
        Self::new(config.coin_type_tag, config.minting_authority.clone())
            .with_concurrency(config.mint_concurrency)
    }

    /// Bound the number of creations in flight. Values below 1 mean 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_address_source(mut self, addresses: Arc<dyn TokenAddressSource>) -> Self {
        self.addresses = addresses;
        self
    }

    fn permissions() -> PermissionSet {
        // The holder must be able to transfer the token later.
        PermissionSet::new().allow(Grantee::Anyone, &[Action::Update])
    }

    async fn mint_one(
        &self,
        session: &dyn NetworkSession,
        coin_data: Vec<u8>,
    ) -> Result<TokenId, TokenFailure> {
        let address = DataAddress::new(self.addresses.next_name(), self.coin_type_tag);
        let token = TokenId(address.name);

        match session
            .create_mutable(
                address,
                vec![(record_keys::COIN_DATA.to_string(), coin_data)],
                Self::permissions(),
            )
            .await
        {
            Ok(()) => {
                debug!(%token, "Token minted");
                Ok(token)
            }
            Err(StoreError::DataExists { .. }) => Err(TokenFailure::Conflict(token)),
            Err(other) => Err(TokenFailure::Network(other)),
        }
    }

    async fn mint_sequential(
        &self,
        session: &dyn NetworkSession,
        coin_data: Vec<u8>,
        count: usize,
    ) -> MintResult<Vec<TokenId>> {
        let mut minted = Vec::with_capacity(count);
        for _ in 0..count {
            match self.mint_one(session, coin_data.clone()).await {
                Ok(token) => minted.push(token),
                Err(failure) => return Err(failure.with_minted(minted)),
            }
        }
        Ok(minted)
    }

    async fn mint_concurrent(
        &self,
        session: &dyn NetworkSession,
        coin_data: Vec<u8>,
        count: usize,
    ) -> MintResult<Vec<TokenId>> {
        let outcomes: Vec<Result<TokenId, TokenFailure>> = stream::iter(0..count)
            .map(|_| self.mint_one(session, coin_data.clone()))
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut minted = Vec::with_capacity(count);
        let mut first_failure = None;
        for outcome in outcomes {
            match outcome {
                Ok(token) => minted.push(token),
                Err(failure) if first_failure.is_none() => first_failure = Some(failure),
                Err(_) => {}
            }
        }
        match first_failure {
            None => Ok(minted),
            Some(failure) => Err(failure.with_minted(minted)),
        }
    }
}

#[async_trait]
impl TokenMintingApi for TokenMinter {
    async fn mint(
        &self,
        session: &dyn NetworkSession,
        owner: &str,
        count: usize,
    ) -> MintResult<Vec<TokenId>> {
        if count == 0 {
            return Ok(Vec::new());
        }

        let coin_data = CoinRecord::minted(owner, self.minting_authority.as_str())
            .to_json()
            .map_err(|e| MintError::Encoding {
                reason: e.to_string(),
                minted: Vec::new(),
            })?;

        info!(count, concurrency = self.concurrency, "Minting tokens");
        let result = if self.concurrency == 1 {
            self.mint_sequential(session, coin_data, count).await
        } else {
            self.mint_concurrent(session, coin_data, count).await
        };

        if let Err(err) = &result {
            warn!(minted = err.minted().len(), requested = count, error = %err, "Mint batch incomplete");
        }
        result
    }
}
