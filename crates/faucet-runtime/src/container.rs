//! # Faucet Container
//!
//! Holds the authorised session and the checkpoint store shared by every
//! orchestrator built from it.
//!
//! ```text
//! RuntimeConfig ──authorise(AppInfo)──→ session
//!                                          │
//!      page load ──orchestrator()──→ FaucetOrchestrator (own status, shared checkpoints)
//! ```

use crate::config::RuntimeConfig;
use fc_01_identity_resolver::resolver_for;
use fc_02_token_minter::TokenMinter;
use fc_03_notification::Notifier;
use fc_04_feedback_publisher::publisher_for;
use fc_05_orchestrator::{FaucetOrchestrator, InMemoryCheckpointStore};
use shared_store::{AuthorizationError, Authorizer, NetworkSession};
use std::sync::Arc;
use tracing::{info, instrument};

/// Authorised faucet wiring.
pub struct FaucetContainer {
    /// Runtime configuration (immutable after bootstrap).
    pub config: RuntimeConfig,
    pub session: Arc<dyn NetworkSession>,
    /// Survives across orchestrators so a retried submission can resume.
    pub checkpoints: Arc<InMemoryCheckpointStore>,
}

impl FaucetContainer {
    /// Authorise the application and keep the session.
    #[instrument(name = "faucet_bootstrap", skip_all, fields(app_id = %config.app.id))]
    pub async fn bootstrap(
        config: RuntimeConfig,
        authorizer: &dyn Authorizer,
    ) -> Result<Self, AuthorizationError> {
        let session = authorizer.authorise(&config.app).await?;
        info!(
            reward_count = config.faucet.reward_count,
            resolution = ?config.faucet.resolution,
            "Faucet session authorised"
        );
        Ok(Self {
            config,
            session,
            checkpoints: Arc::new(InMemoryCheckpointStore::new()),
        })
    }

    /// A fresh orchestrator, starting `Idle`.
    pub fn orchestrator(&self) -> FaucetOrchestrator {
        let faucet = self.config.faucet.clone();
        FaucetOrchestrator::new(
            faucet.clone(),
            Arc::clone(&self.session),
            resolver_for(&faucet),
            Arc::new(TokenMinter::from_config(&faucet)),
            Arc::new(Notifier::from_config(&faucet)),
            publisher_for(&faucet),
            self.checkpoints.clone(),
        )
    }
}
