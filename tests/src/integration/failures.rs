//! # Failure Scenarios
//!
//! A failing stage leaves every earlier effect in place and moves the
//! orchestrator to `Failed` with a diagnostic message. Retrying the same
//! submission resumes from the checkpoint instead of minting again.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use faucet_runtime::{FaucetContainer, ProfileLink, RuntimeConfig};
    use fc_01_identity_resolver::ResolutionError;
    use fc_02_token_minter::{MintError, ScriptedAddressSource, TokenMinter};
    use fc_04_feedback_publisher::PublishError;
    use fc_05_orchestrator::{
        CancelToken, CheckpointKey, CheckpointStore, FaucetApi, FaucetError, Stage, Submission,
        SubmissionState,
    };
    use shared_crypto::random_bytes32;
    use shared_store::{AuthorizationError, Operation, StoreError};
    use shared_types::{
        record_keys, Action, DataAddress, FaucetConfig, Grantee, PermissionSet, Rating, TokenId,
        XorName,
    };
    use std::sync::Arc;

    fn scripted_names(count: usize) -> Vec<XorName> {
        (0..count).map(|_| XorName::new(random_bytes32())).collect()
    }

    /// Put a foreign record at the token address `name`.
    fn occupy(harness: &Harness, name: XorName) {
        harness.network().seed_mutable(
            DataAddress::new(name, harness.config().coin_type_tag),
            "squatter",
            vec![(record_keys::COIN_DATA.into(), b"{}".to_vec())],
            PermissionSet::new(),
        );
    }

    // =============================================================================
    // RESOLVE
    // =============================================================================

    #[tokio::test]
    async fn test_profile_without_inbox_link_fails_before_minting() {
        let harness = Harness::new(FaucetConfig::default());
        let wallet = harness.sandbox.provision_linked_wallet();
        harness
            .sandbox
            .provision_profile("safe://dave#me", &wallet, ProfileLink::None);
        let orchestrator = harness.orchestrator();

        let result = orchestrator
            .submit(
                Submission::new("safe://dave#me", Rating::from_raw(5), "Great app"),
                CancelToken::never(),
            )
            .await;

        assert!(matches!(
            result,
            Err(FaucetError::Resolution(ResolutionError::MissingInboxLink { .. }))
        ));
        assert_eq!(harness.calls(Operation::CreateMutable), 0);
        assert_eq!(harness.calls(Operation::InsertEntry), 0);
        assert_eq!(harness.calls(Operation::PutImmutable), 0);
        assert!(harness.feedback().is_empty());

        let status = orchestrator.status();
        assert_eq!(status.state, SubmissionState::Failed);
        assert!(status.message.contains("inbox"));
    }

    #[tokio::test]
    async fn test_unknown_profile_fails() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let result = harness
            .orchestrator()
            .submit(
                Submission::new("safe://nobody#me", Rating::none(), ""),
                CancelToken::never(),
            )
            .await;

        assert!(matches!(
            result,
            Err(FaucetError::Resolution(ResolutionError::ProfileNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_inbox_without_encryption_key_fails() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let key = "ab".repeat(32);
        harness.network().seed_mutable(
            fc_01_identity_resolver::raw_key_inbox(&key, harness.config().inbox_type_tag),
            "wallet",
            vec![(record_keys::INBOX_WALLET_PK.into(), key.clone().into_bytes())],
            PermissionSet::new().allow(Grantee::Anyone, &[Action::Insert]),
        );

        let result = harness
            .orchestrator()
            .submit(Submission::new(&key, Rating::none(), ""), CancelToken::never())
            .await;

        match result {
            Err(FaucetError::Resolution(ResolutionError::MissingField { field, .. })) => {
                assert_eq!(field, record_keys::INBOX_ENC_PK);
            }
            other => panic!("expected missing field, got {:?}", other),
        }
        assert_eq!(harness.calls(Operation::CreateMutable), 0);
    }

    // =============================================================================
    // MINT
    // =============================================================================

    #[tokio::test]
    async fn test_conflict_at_third_token_stops_sequential_batch() {
        let harness = Harness::new(FaucetConfig::default());
        let wallet = harness.sandbox.provision_wallet();
        let names = scripted_names(6);
        occupy(&harness, names[2]);
        let minter = TokenMinter::from_config(harness.config())
            .with_address_source(Arc::new(ScriptedAddressSource::new(names.clone())));
        let orchestrator = harness.orchestrator_with_minter(minter);

        let submission = Submission::new(&wallet.wallet_key, Rating::from_raw(5), "Great app");
        let result = orchestrator
            .submit(submission.clone(), CancelToken::never())
            .await;

        match result {
            Err(FaucetError::Mint(MintError::Conflict { token, minted })) => {
                assert_eq!(token, TokenId(names[2]));
                assert_eq!(minted, vec![TokenId(names[0]), TokenId(names[1])]);
            }
            other => panic!("expected conflict, got {:?}", other),
        }
        // Tokens 1-2 stay, 4-6 never attempted, the squatter is untouched.
        assert_eq!(harness.calls(Operation::CreateMutable), 3);
        assert_eq!(harness.minted_records(), 3);
        assert_eq!(
            harness
                .network()
                .entries(&DataAddress::new(names[2], harness.config().coin_type_tag))
                .unwrap()[0]
                .1,
            b"{}".to_vec()
        );
        // Notify is never called.
        assert_eq!(harness.calls(Operation::InsertEntry), 0);
        assert!(harness.sandbox.read_notifications(&wallet).unwrap().is_empty());
        assert_eq!(orchestrator.status().state, SubmissionState::Failed);

        // Partial batch is checkpointed.
        let checkpoint = harness
            .checkpoints
            .load(&CheckpointKey::new(wallet.wallet_key.clone(), submission.submission_id))
            .unwrap();
        assert_eq!(checkpoint.minted.len(), 2);
    }

    #[tokio::test]
    async fn test_conflict_in_concurrent_batch_never_notifies() {
        let harness = Harness::new(FaucetConfig::default());
        let wallet = harness.sandbox.provision_wallet();
        let names = scripted_names(6);
        occupy(&harness, names[2]);
        let minter = TokenMinter::from_config(harness.config())
            .with_concurrency(6)
            .with_address_source(Arc::new(ScriptedAddressSource::new(names)));
        let orchestrator = harness.orchestrator_with_minter(minter);

        let result = orchestrator
            .submit(
                Submission::new(&wallet.wallet_key, Rating::from_raw(5), "Great app"),
                CancelToken::never(),
            )
            .await;

        assert!(matches!(
            result,
            Err(FaucetError::Mint(MintError::Conflict { .. }))
        ));
        assert_eq!(harness.calls(Operation::InsertEntry), 0);
        assert!(harness.feedback().is_empty());
        assert_eq!(orchestrator.status().state, SubmissionState::Failed);
    }

    #[tokio::test]
    async fn test_retry_after_conflict_tops_up_batch() {
        let harness = Harness::new(FaucetConfig::default());
        let wallet = harness.sandbox.provision_wallet();
        let names = scripted_names(3);
        occupy(&harness, names[2]);
        let minter = TokenMinter::from_config(harness.config())
            .with_address_source(Arc::new(ScriptedAddressSource::new(names.clone())));
        let orchestrator = harness.orchestrator_with_minter(minter);
        let submission = Submission::new(&wallet.wallet_key, Rating::from_raw(2), "meh");

        assert!(orchestrator
            .submit(submission.clone(), CancelToken::never())
            .await
            .is_err());
        let receipt = orchestrator
            .submit(submission, CancelToken::never())
            .await
            .expect("retry succeeds");

        // Two from the first attempt, four fresh ones.
        assert_eq!(receipt.token_ids.len(), 6);
        assert_eq!(&receipt.token_ids[..2], &[TokenId(names[0]), TokenId(names[1])]);
        assert_eq!(harness.calls(Operation::CreateMutable), 3 + 4);
        assert_eq!(harness.sandbox.read_notifications(&wallet).unwrap().len(), 1);
        assert_eq!(orchestrator.status().state, SubmissionState::Transferred);
    }

    // =============================================================================
    // NOTIFY / PUBLISH
    // =============================================================================

    #[tokio::test]
    async fn test_notify_failure_keeps_tokens_and_retry_reuses_them() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let wallet = harness.sandbox.provision_wallet();
        harness.network().fail_nth(
            Operation::InsertEntry,
            1,
            StoreError::Connection("inbox unreachable".into()),
        );
        let submission = Submission::new(&wallet.wallet_key, Rating::from_raw(5), "");

        let first = harness.orchestrator();
        let result = first.submit(submission.clone(), CancelToken::never()).await;
        assert_eq!(result.unwrap_err().stage(), Some(Stage::Notify));
        assert_eq!(first.status().state, SubmissionState::Failed);
        assert_eq!(harness.minted_records(), 3);
        assert!(harness.feedback().is_empty());

        // A reloaded page retrying the same submission.
        let receipt = harness
            .orchestrator()
            .submit(submission, CancelToken::never())
            .await
            .unwrap();
        assert_eq!(harness.calls(Operation::CreateMutable), 3);
        assert_eq!(harness.minted_records(), 3);

        let notifications = harness.sandbox.read_notifications(&wallet).unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].coin_ids, receipt.token_ids);
        assert_eq!(harness.feedback().len(), 1);
    }

    #[tokio::test]
    async fn test_publish_failure_leaves_notification_in_place() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let wallet = harness.sandbox.provision_wallet();
        harness.network().fail_nth(
            Operation::PutImmutable,
            1,
            StoreError::Connection("mail relay down".into()),
        );
        let submission = Submission::new(&wallet.wallet_key, Rating::from_raw(4), "Nice");
        let orchestrator = harness.orchestrator();

        let result = orchestrator
            .submit(submission.clone(), CancelToken::never())
            .await;
        assert!(matches!(
            result,
            Err(FaucetError::Publish(PublishError::Network(StoreError::Connection(_))))
        ));
        assert_eq!(orchestrator.status().state, SubmissionState::Failed);
        assert_eq!(harness.sandbox.read_notifications(&wallet).unwrap().len(), 1);

        // Retry only publishes.
        let inserts_before = harness.calls(Operation::InsertEntry);
        orchestrator
            .submit(submission, CancelToken::never())
            .await
            .unwrap();
        assert_eq!(harness.calls(Operation::CreateMutable), 3);
        assert_eq!(harness.calls(Operation::InsertEntry), inserts_before + 1);
        assert_eq!(harness.sandbox.read_notifications(&wallet).unwrap().len(), 1);
        assert_eq!(harness.feedback(), vec!["[4 stars] Nice".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_feedback_channel_fails_publish() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let wallet = harness.sandbox.provision_wallet();
        let config = FaucetConfig {
            feedback: shared_types::FeedbackChannel::Mailbox {
                channel_id: "nobody.home".into(),
            },
            ..harness.config().clone()
        };
        let orchestrator =
            fc_05_orchestrator::FaucetOrchestrator::standard(config, harness.session.clone());

        let result = orchestrator
            .submit(
                Submission::new(&wallet.wallet_key, Rating::from_raw(5), ""),
                CancelToken::never(),
            )
            .await;

        assert!(matches!(
            result,
            Err(FaucetError::Publish(PublishError::ChannelNotFound { .. }))
        ));
        assert_eq!(harness.minted_records(), 3);
        assert_eq!(harness.sandbox.read_notifications(&wallet).unwrap().len(), 1);
    }

    // =============================================================================
    // AUTHORIZATION
    // =============================================================================

    #[tokio::test]
    async fn test_denied_authorisation_makes_no_calls() {
        let harness = Harness::new(FaucetConfig::for_testing());
        harness.network().deny_authorisation();

        let result = FaucetContainer::bootstrap(RuntimeConfig::default(), harness.network()).await;

        assert!(matches!(result, Err(AuthorizationError::Denied { .. })));
        assert_eq!(harness.network().operation_count(), 0);
    }
}
