//! Error types for the Identity Resolver.

use shared_store::{ResourceKind, StoreError};
use shared_types::DataAddress;
use thiserror::Error;

/// Resolution failures.
///
/// Everything except a transient [`ResolutionError::Network`] is terminal:
/// repeating the same resolution will fail the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Identifier was empty or whitespace only.
    #[error("Recipient identifier is empty")]
    EmptyIdentifier,

    /// Identifier is neither a raw key nor a URI this strategy accepts.
    #[error("Unsupported recipient identifier: {0}")]
    UnsupportedIdentifier(String),

    /// Nothing is published at the profile URI.
    #[error("Profile not found: {uri}")]
    ProfileNotFound { uri: String },

    /// The URI resolved to something other than a profile document.
    #[error("Resource at {uri} is not a profile document ({kind:?})")]
    NotAProfile { uri: String, kind: ResourceKind },

    /// The profile carries neither an inbox link nor legacy coordinates.
    #[error("Profile {uri} has no inbox link")]
    MissingInboxLink { uri: String },

    /// The inbox link could not be turned into an address.
    #[error("Malformed inbox link on {uri}: {reason}")]
    MalformedInboxLink { uri: String, reason: String },

    /// The derived or linked inbox record does not exist.
    #[error("Inbox not found at {address}")]
    InboxNotFound { address: DataAddress },

    /// The inbox lacks a required key field, or it is empty.
    #[error("Inbox {address} is missing field '{field}'")]
    MissingField { address: DataAddress, field: String },

    /// Any other store failure.
    #[error("Network error during resolution: {0}")]
    Network(StoreError),
}

impl ResolutionError {
    /// Whether the caller may retry the same resolution.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(err) => err.is_transient(),
            _ => false,
        }
    }
}

/// Result type for resolution.
pub type ResolutionResult<T> = Result<T, ResolutionError>;
