//! # Session Ports
//!
//! The capability-based primitives the faucet core is written against. A
//! session is acquired once through an [`Authorizer`] and then passed by
//! reference into every component call.

use crate::errors::{AuthorizationError, StoreResult};
use async_trait::async_trait;
use shared_types::{AppInfo, DataAddress, Graph, PermissionSet, XorName};
use std::sync::Arc;

/// Classification of a fetched resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResourceKind {
    Document,
    MutableData,
    ImmutableData,
}

/// Result of fetching a URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchedResource {
    /// A linked-data document such as a profile.
    Document(Graph),
    /// A mutable record.
    MutableData(DataAddress),
    /// Immutable content.
    ImmutableData(Vec<u8>),
}

impl FetchedResource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Document(_) => ResourceKind::Document,
            Self::MutableData(_) => ResourceKind::MutableData,
            Self::ImmutableData(_) => ResourceKind::ImmutableData,
        }
    }
}

/// Remote data store operations available to an authorized session.
///
/// All calls are network round-trips and may fail with connection,
/// permission or not-found errors.
#[async_trait]
pub trait NetworkSession: Send + Sync {
    /// Identifier of the application this session acts for.
    fn app_id(&self) -> &str;

    /// Create a mutable record with initial entries and permissions.
    ///
    /// Fails with `DataExists` if the address is taken; never overwrites.
    async fn create_mutable(
        &self,
        address: DataAddress,
        entries: Vec<(String, Vec<u8>)>,
        permissions: PermissionSet,
    ) -> StoreResult<()>;

    /// Read one entry of a mutable record.
    async fn get_entry(&self, address: &DataAddress, key: &str) -> StoreResult<Vec<u8>>;

    /// Append a new entry. Fails with `EntryExists` if `key` is present.
    async fn insert_entry(&self, address: &DataAddress, key: &str, value: Vec<u8>)
        -> StoreResult<()>;

    /// Entry keys of a mutable record, in insertion order.
    async fn list_keys(&self, address: &DataAddress) -> StoreResult<Vec<String>>;

    /// Store immutable content and return its content-derived name.
    async fn put_immutable(&self, content: Vec<u8>) -> StoreResult<XorName>;

    /// Read immutable content by name.
    async fn get_immutable(&self, name: &XorName) -> StoreResult<Vec<u8>>;

    /// Fetch and classify the resource at `uri`.
    async fn fetch(&self, uri: &str) -> StoreResult<FetchedResource>;
}

/// Authorization provider: exchanges an application descriptor for a session.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorise(&self, app: &AppInfo)
        -> Result<Arc<dyn NetworkSession>, AuthorizationError>;
}

/// Reject descriptors no provider would accept.
pub fn validate_app_info(app: &AppInfo) -> Result<(), AuthorizationError> {
    if app.id.trim().is_empty() {
        return Err(AuthorizationError::InvalidApp("empty app id".to_string()));
    }
    if app.name.trim().is_empty() {
        return Err(AuthorizationError::InvalidApp("empty app name".to_string()));
    }
    if app.permissions.is_empty() {
        return Err(AuthorizationError::InvalidApp(
            "no capabilities requested".to_string(),
        ));
    }
    Ok(())
}
