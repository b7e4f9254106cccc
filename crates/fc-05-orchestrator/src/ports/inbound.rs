//! # Inbound Ports
//!
//! The single trigger into the faucet and its observable status.

use crate::cancellation::CancelToken;
use crate::domain::{FaucetResult, Submission, SubmissionReceipt, SubmissionStatus};
use async_trait::async_trait;
use tokio::sync::watch;

#[async_trait]
pub trait FaucetApi: Send + Sync {
    /// Run one submission through resolve, mint, notify and publish.
    ///
    /// An empty recipient is rejected without leaving `Idle`. While a
    /// submission is running others fail with `SubmissionInFlight`; after a
    /// successful one they fail with `AlreadyClaimed`.
    async fn submit(
        &self,
        submission: Submission,
        cancel: CancelToken,
    ) -> FaucetResult<SubmissionReceipt>;

    /// Current status.
    fn status(&self) -> SubmissionStatus;

    /// Receiver notified on every status change.
    fn subscribe(&self) -> watch::Receiver<SubmissionStatus>;
}
