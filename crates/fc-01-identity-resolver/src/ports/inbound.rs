//! # Inbound Ports
//!
//! API the orchestrator drives.

use crate::domain::ResolutionResult;
use async_trait::async_trait;
use shared_store::NetworkSession;
use shared_types::RecipientInfo;

/// Resolves a human-supplied recipient identifier to delivery coordinates.
///
/// Implementations must reject empty input before touching the network.
#[async_trait]
pub trait RecipientResolver: Send + Sync {
    /// Resolve `identifier` using `session` for every lookup.
    ///
    /// ## Returns
    ///
    /// - `Ok(RecipientInfo)`: inbox address and both keys, all non-empty
    /// - `Err(ResolutionError)`: see [`ResolutionError::is_retryable`](crate::ResolutionError::is_retryable)
    async fn resolve(
        &self,
        session: &dyn NetworkSession,
        identifier: &str,
    ) -> ResolutionResult<RecipientInfo>;
}
