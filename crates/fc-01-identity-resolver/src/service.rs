//! # Resolver Service
//!
//! Two strategies behind [`RecipientResolver`]:
//!
//! - [`ProfileResolver`] (canonical): raw keys and profile-document URIs.
//! - [`RawKeyResolver`]: raw keys only.
//!
//! Both finish by reading the inbox record, which must expose the wallet
//! key and the encryption key.

use crate::domain::{
    inbox_from_profile, raw_key_inbox, RecipientIdentifier, ResolutionError, ResolutionResult,
};
use crate::ports::RecipientResolver;
use async_trait::async_trait;
use shared_store::{FetchedResource, NetworkSession, StoreError};
use shared_types::{record_keys, DataAddress, FaucetConfig, RecipientInfo, ResolutionStrategy, TypeTag};
use std::sync::Arc;
use tracing::{debug, info};

/// Canonical resolver: raw keys are derived directly, anything else is
/// fetched as a profile document.
#[derive(Clone, Debug)]
pub struct ProfileResolver {
    inbox_type_tag: TypeTag,
}

impl ProfileResolver {
    pub fn new(inbox_type_tag: TypeTag) -> Self {
        Self { inbox_type_tag }
    }

    async fn locate_profile_inbox(
        &self,
        session: &dyn NetworkSession,
        uri: &str,
    ) -> ResolutionResult<DataAddress> {
        let resource = session.fetch(uri).await.map_err(|e| match e {
            StoreError::NotFound { uri } => ResolutionError::ProfileNotFound { uri },
            other => ResolutionError::Network(other),
        })?;

        match resource {
            FetchedResource::Document(profile) => inbox_from_profile(uri, &profile),
            other => Err(ResolutionError::NotAProfile {
                uri: uri.to_string(),
                kind: other.kind(),
            }),
        }
    }
}

#[async_trait]
impl RecipientResolver for ProfileResolver {
    async fn resolve(
        &self,
        session: &dyn NetworkSession,
        identifier: &str,
    ) -> ResolutionResult<RecipientInfo> {
        let inbox = match RecipientIdentifier::parse(identifier)? {
            RecipientIdentifier::RawKey(key) => raw_key_inbox(&key, self.inbox_type_tag),
            RecipientIdentifier::ProfileUri(uri) => {
                debug!(%uri, "Fetching profile document");
                self.locate_profile_inbox(session, &uri).await?
            }
        };
        read_inbox(session, inbox).await
    }
}

/// Alternate resolver accepting only raw wallet keys.
#[derive(Clone, Debug)]
pub struct RawKeyResolver {
    inbox_type_tag: TypeTag,
}

impl RawKeyResolver {
    pub fn new(inbox_type_tag: TypeTag) -> Self {
        Self { inbox_type_tag }
    }
}

#[async_trait]
impl RecipientResolver for RawKeyResolver {
    async fn resolve(
        &self,
        session: &dyn NetworkSession,
        identifier: &str,
    ) -> ResolutionResult<RecipientInfo> {
        match RecipientIdentifier::parse(identifier)? {
            RecipientIdentifier::RawKey(key) => {
                read_inbox(session, raw_key_inbox(&key, self.inbox_type_tag)).await
            }
            RecipientIdentifier::ProfileUri(uri) => {
                Err(ResolutionError::UnsupportedIdentifier(uri))
            }
        }
    }
}

/// Build the resolver selected by `config.resolution`.
pub fn resolver_for(config: &FaucetConfig) -> Arc<dyn RecipientResolver> {
    match config.resolution {
        ResolutionStrategy::Profile => Arc::new(ProfileResolver::new(config.inbox_type_tag)),
        ResolutionStrategy::RawKey => Arc::new(RawKeyResolver::new(config.inbox_type_tag)),
    }
}

async fn read_inbox(
    session: &dyn NetworkSession,
    inbox: DataAddress,
) -> ResolutionResult<RecipientInfo> {
    let wallet_public_key = read_key_field(session, inbox, record_keys::INBOX_WALLET_PK).await?;
    let encryption_public_key = read_key_field(session, inbox, record_keys::INBOX_ENC_PK).await?;

    info!(%inbox, "Recipient resolved");
    Ok(RecipientInfo {
        wallet_public_key,
        encryption_public_key,
        inbox,
    })
}

async fn read_key_field(
    session: &dyn NetworkSession,
    inbox: DataAddress,
    field: &str,
) -> ResolutionResult<String> {
    let missing = || ResolutionError::MissingField {
        address: inbox,
        field: field.to_string(),
    };

    let bytes = session.get_entry(&inbox, field).await.map_err(|e| match e {
        StoreError::NoSuchData { address } => ResolutionError::InboxNotFound { address },
        StoreError::NoSuchEntry { .. } => missing(),
        other => ResolutionError::Network(other),
    })?;

    let value = String::from_utf8(bytes).map_err(|_| missing())?;
    let value = value.trim();
    if value.is_empty() {
        return Err(missing());
    }
    Ok(value.to_string())
}
