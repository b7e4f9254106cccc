//! # Store Errors
//!
//! Failures surfaced by the remote data store and the authorization provider.

use shared_types::DataAddress;
use thiserror::Error;

/// Errors returned by [`NetworkSession`](crate::NetworkSession) calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Connectivity failure; the call may succeed if repeated.
    #[error("Connection error: {0}")]
    Connection(String),

    /// The session lacks the required permission on the record.
    #[error("Permission denied on {address}")]
    PermissionDenied { address: DataAddress },

    /// No mutable record at the address.
    #[error("No such data: {address}")]
    NoSuchData { address: DataAddress },

    /// The record exists but has no entry under the key.
    #[error("No such entry '{key}' in {address}")]
    NoSuchEntry { address: DataAddress, key: String },

    /// A record already exists at the address.
    #[error("Data already exists at {address}")]
    DataExists { address: DataAddress },

    /// The key is already present in the append-only record.
    #[error("Entry '{key}' already exists in {address}")]
    EntryExists { address: DataAddress, key: String },

    /// Nothing is published at the URI.
    #[error("Resource not found: {uri}")]
    NotFound { uri: String },

    /// Stored bytes could not be interpreted.
    #[error("Invalid content: {0}")]
    InvalidContent(String),
}

impl StoreError {
    /// Whether repeating the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the authorization provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    /// The user or provider refused the requested capabilities.
    #[error("Authorization denied for app '{app_id}'")]
    Denied { app_id: String },

    /// The application descriptor is incomplete.
    #[error("Invalid application descriptor: {0}")]
    InvalidApp(String),

    /// The provider could not be reached.
    #[error("Authorization provider unreachable: {0}")]
    Unreachable(String),
}
