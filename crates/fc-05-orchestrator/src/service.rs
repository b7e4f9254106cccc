//! # Faucet Orchestrator
//!
//! Runs a submission as a linear pipeline of fallible stages:
//!
//! ```text
//! resolve ──RecipientInfo──→ mint ──[TokenId; N]──→ notify ──TransactionId──→ publish
//! ```
//!
//! Each stage starts only after the previous one settled. Before a stage
//! the cancel token is checked, and while it runs the stage is raced
//! against cancellation. Progress is checkpointed after every stage so a
//! retried submission (same recipient, same submission id) picks up where
//! it stopped: minted tokens are reused, the composed notification is
//! re-delivered under the same transaction id, and completed stages are
//! skipped. Nothing is compensated on failure.

use crate::adapters::InMemoryCheckpointStore;
use crate::cancellation::CancelToken;
use crate::domain::{
    Checkpoint, CheckpointKey, FaucetError, FaucetResult, Stage, Submission, SubmissionReceipt,
    SubmissionState, SubmissionStatus, CLAIMED_MESSAGE, TRANSFERRED_MESSAGE,
};
use crate::ports::{CheckpointStore, FaucetApi};
use async_trait::async_trait;
use fc_01_identity_resolver::{resolver_for, RecipientIdentifier, RecipientResolver};
use fc_02_token_minter::{TokenMinter, TokenMintingApi};
use fc_03_notification::{NotificationApi, NotificationError, Notifier};
use fc_04_feedback_publisher::{publisher_for, FeedbackPost, FeedbackPublisher};
use shared_store::NetworkSession;
use shared_types::{FaucetConfig, RecipientInfo};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Sequences the four faucet components for one session.
pub struct FaucetOrchestrator {
    config: FaucetConfig,
    session: Arc<dyn NetworkSession>,
    resolver: Arc<dyn RecipientResolver>,
    minter: Arc<dyn TokenMintingApi>,
    notifier: Arc<dyn NotificationApi>,
    publisher: Arc<dyn FeedbackPublisher>,
    checkpoints: Arc<dyn CheckpointStore>,
    status: watch::Sender<SubmissionStatus>,
}

impl FaucetOrchestrator {
    pub fn new(
        config: FaucetConfig,
        session: Arc<dyn NetworkSession>,
        resolver: Arc<dyn RecipientResolver>,
        minter: Arc<dyn TokenMintingApi>,
        notifier: Arc<dyn NotificationApi>,
        publisher: Arc<dyn FeedbackPublisher>,
        checkpoints: Arc<dyn CheckpointStore>,
    ) -> Self {
        let (status, _) = watch::channel(SubmissionStatus::default());
        Self {
            config,
            session,
            resolver,
            minter,
            notifier,
            publisher,
            checkpoints,
            status,
        }
    }

    /// Orchestrator with the components `config` selects and an in-memory
    /// checkpoint store.
    pub fn standard(config: FaucetConfig, session: Arc<dyn NetworkSession>) -> Self {
        let resolver = resolver_for(&config);
        let minter = Arc::new(TokenMinter::from_config(&config));
        let notifier = Arc::new(Notifier::from_config(&config));
        let publisher = publisher_for(&config);
        Self::new(
            config,
            session,
            resolver,
            minter,
            notifier,
            publisher,
            Arc::new(InMemoryCheckpointStore::new()),
        )
    }

    pub fn config(&self) -> &FaucetConfig {
        &self.config
    }

    /// Atomically move into `Claimed`.
    fn claim(&self) -> FaucetResult<()> {
        let mut refusal = None;
        self.status.send_if_modified(|status| {
            if status.state.can_transition_to(SubmissionState::Claimed) {
                *status = SubmissionStatus::new(SubmissionState::Claimed, CLAIMED_MESSAGE);
                true
            } else {
                refusal = Some(match status.state {
                    SubmissionState::Transferred => FaucetError::AlreadyClaimed,
                    _ => FaucetError::SubmissionInFlight,
                });
                false
            }
        });
        refusal.map_or(Ok(()), Err)
    }

    fn finish(&self, state: SubmissionState, message: String) {
        let mut rejected = None;
        self.status.send_if_modified(|status| {
            if status.state.can_transition_to(state) {
                *status = SubmissionStatus::new(state, message);
                true
            } else {
                rejected = Some(status.state);
                false
            }
        });
        if let Some(from) = rejected {
            warn!(?from, to = ?state, "Ignoring invalid status transition");
        }
    }

    /// Run one stage unless cancelled, aborting it if cancellation arrives
    /// while it is in flight.
    async fn run_stage<T, E>(
        &self,
        stage: Stage,
        cancel: &CancelToken,
        work: impl Future<Output = Result<T, E>> + Send,
    ) -> FaucetResult<T>
    where
        FaucetError: From<E>,
    {
        if cancel.is_cancelled() {
            return Err(FaucetError::Cancelled { stage });
        }
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FaucetError::Cancelled { stage }),
            result = work => result.map_err(FaucetError::from),
        }
    }

    async fn run_pipeline(
        &self,
        submission: &Submission,
        key: &CheckpointKey,
        cancel: &CancelToken,
    ) -> FaucetResult<SubmissionReceipt> {
        let session = self.session.as_ref();
        let mut checkpoint = self.checkpoints.load(key).unwrap_or_default();
        if checkpoint.has_progress() {
            warn!(
                submission_id = %key.submission_id,
                minted = checkpoint.minted.len(),
                notified = checkpoint.notified,
                "Resuming submission from checkpoint"
            );
        }

        // 1. Resolve
        let recipient = match checkpoint.recipient.clone() {
            Some(recipient) => recipient,
            None => {
                let recipient = self
                    .run_stage(
                        Stage::Resolve,
                        cancel,
                        self.resolver.resolve(session, &submission.recipient),
                    )
                    .await?;
                checkpoint.recipient = Some(recipient.clone());
                self.checkpoints.save(key, &checkpoint);
                recipient
            }
        };

        // 2. Mint
        self.mint_missing(&recipient, &mut checkpoint, key, cancel)
            .await?;

        // 3. Notify
        let notification = match checkpoint.notification.clone() {
            Some(notification) => notification,
            None => {
                let notification = self.notifier.compose(&checkpoint.minted);
                checkpoint.notification = Some(notification.clone());
                self.checkpoints.save(key, &checkpoint);
                notification
            }
        };
        if !checkpoint.notified {
            let delivery = self
                .run_stage(
                    Stage::Notify,
                    cancel,
                    self.notifier.deliver(session, &recipient, &notification),
                )
                .await;
            match delivery {
                Ok(()) => {}
                Err(FaucetError::Notification(NotificationError::AlreadyDelivered { .. })) => {
                    warn!(tx_id = %notification.transaction_id, "Notification already in inbox");
                }
                Err(e) => return Err(e),
            }
            checkpoint.notified = true;
            self.checkpoints.save(key, &checkpoint);
        }

        // 4. Publish
        if !checkpoint.published {
            let feedback = FeedbackPost::new(submission.rating, submission.comments.clone());
            self.run_stage(
                Stage::Publish,
                cancel,
                self.publisher.publish(session, &feedback),
            )
            .await?;
            checkpoint.published = true;
            self.checkpoints.save(key, &checkpoint);
        }

        Ok(SubmissionReceipt {
            submission_id: submission.submission_id,
            recipient: key.recipient.clone(),
            inbox: recipient.inbox,
            token_ids: checkpoint.minted,
            transaction_id: notification.transaction_id,
        })
    }

    async fn mint_missing(
        &self,
        recipient: &RecipientInfo,
        checkpoint: &mut Checkpoint,
        key: &CheckpointKey,
        cancel: &CancelToken,
    ) -> FaucetResult<()> {
        let missing = self
            .config
            .reward_count
            .saturating_sub(checkpoint.minted.len());
        if missing == 0 {
            return Ok(());
        }

        let minted = self
            .run_stage(
                Stage::Mint,
                cancel,
                self.minter
                    .mint(self.session.as_ref(), &recipient.wallet_public_key, missing),
            )
            .await;
        match minted {
            Ok(tokens) => {
                checkpoint.minted.extend(tokens);
                self.checkpoints.save(key, checkpoint);
                Ok(())
            }
            Err(FaucetError::Mint(err)) => {
                checkpoint.minted.extend_from_slice(err.minted());
                self.checkpoints.save(key, checkpoint);
                Err(FaucetError::Mint(err))
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl FaucetApi for FaucetOrchestrator {
    async fn submit(
        &self,
        submission: Submission,
        cancel: CancelToken,
    ) -> FaucetResult<SubmissionReceipt> {
        // Rejected before claiming: the form stays usable.
        let identifier = RecipientIdentifier::parse(&submission.recipient)?;
        self.claim()?;

        let key = CheckpointKey::new(identifier.normalized(), submission.submission_id);
        info!(
            submission_id = %submission.submission_id,
            recipient = %key.recipient,
            count = self.config.reward_count,
            "Submission claimed"
        );

        let result = self.run_pipeline(&submission, &key, &cancel).await;
        match &result {
            Ok(receipt) => {
                info!(
                    submission_id = %receipt.submission_id,
                    tx_id = %receipt.transaction_id,
                    count = receipt.token_ids.len(),
                    "Reward transferred"
                );
                self.finish(SubmissionState::Transferred, TRANSFERRED_MESSAGE.to_string());
            }
            Err(FaucetError::Cancelled { stage }) => {
                warn!(submission_id = %submission.submission_id, %stage, "Submission cancelled");
                self.finish(
                    SubmissionState::Cancelled,
                    format!("Cancelled before {} completed", stage),
                );
            }
            Err(err) => {
                error!(
                    submission_id = %submission.submission_id,
                    stage = ?err.stage(),
                    error = %err,
                    "Submission failed"
                );
                self.finish(SubmissionState::Failed, err.to_string());
            }
        }
        result
    }

    fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status.subscribe()
    }
}
