//! # Claims and Isolation
//!
//! One submission in flight per orchestrator; a transferred reward stays
//! claimed until the page is reloaded. Orchestrators on separate sessions
//! never see each other's state.

#[cfg(test)]
mod tests {
    use crate::fixtures::{Harness, FAUCET_APP};
    use faucet_runtime::{FaucetContainer, RuntimeConfig, SubmissionOutcome, SubmissionRequest};
    use fc_01_identity_resolver::ResolutionError;
    use fc_05_orchestrator::{
        CancelToken, FaucetApi, FaucetError, FaucetOrchestrator, Submission, SubmissionState,
        CLAIMED_MESSAGE,
    };
    use futures::future::join_all;
    use shared_store::{InMemoryNetwork, NetworkSession};
    use shared_types::{FaucetConfig, Rating};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_second_submission_refused_while_in_flight() {
        let network = InMemoryNetwork::new().with_latency(Duration::from_millis(20));
        let harness = Harness::with_network(network, FaucetConfig::for_testing());
        let wallet = harness.sandbox.provision_wallet();
        let orchestrator = Arc::new(harness.orchestrator());
        let mut status = orchestrator.subscribe();

        let first = {
            let orchestrator = orchestrator.clone();
            let submission = Submission::new(&wallet.wallet_key, Rating::from_raw(5), "first");
            tokio::spawn(async move { orchestrator.submit(submission, CancelToken::never()).await })
        };
        let claimed = status
            .wait_for(|s| s.state == SubmissionState::Claimed)
            .await
            .unwrap()
            .clone();
        assert_eq!(claimed.message, CLAIMED_MESSAGE);

        let second = orchestrator
            .submit(
                Submission::new(&wallet.wallet_key, Rating::from_raw(1), "second"),
                CancelToken::never(),
            )
            .await;
        assert!(matches!(second, Err(FaucetError::SubmissionInFlight)));

        first.await.unwrap().expect("first submission completes");
        assert_eq!(orchestrator.status().state, SubmissionState::Transferred);
        assert_eq!(harness.minted_records(), 3);
        assert_eq!(harness.feedback(), vec!["[5 stars] first".to_string()]);
    }

    #[tokio::test]
    async fn test_transferred_reward_stays_claimed() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let wallet = harness.sandbox.provision_wallet();
        let orchestrator = harness.orchestrator();

        orchestrator
            .submit(
                Submission::new(&wallet.wallet_key, Rating::from_raw(5), ""),
                CancelToken::never(),
            )
            .await
            .unwrap();
        let again = orchestrator
            .submit(
                Submission::new(&wallet.wallet_key, Rating::from_raw(5), ""),
                CancelToken::never(),
            )
            .await;

        assert!(matches!(again, Err(FaucetError::AlreadyClaimed)));
        assert_eq!(orchestrator.status().state, SubmissionState::Transferred);
        assert_eq!(harness.minted_records(), 3);
    }

    #[tokio::test]
    async fn test_empty_recipient_leaves_form_usable() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let orchestrator = harness.orchestrator();

        let result = orchestrator
            .submit(Submission::new("   ", Rating::from_raw(5), "x"), CancelToken::never())
            .await;

        assert!(matches!(
            result,
            Err(FaucetError::Resolution(ResolutionError::EmptyIdentifier))
        ));
        assert_eq!(orchestrator.status().state, SubmissionState::Idle);
        assert_eq!(harness.network().operation_count(), 0);
    }

    #[tokio::test]
    async fn test_independent_orchestrators_do_not_interfere() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let wallets: Vec<_> = (0..4).map(|_| harness.sandbox.provision_wallet()).collect();
        let orchestrators: Vec<FaucetOrchestrator> = (0..4)
            .map(|i| {
                let session: Arc<dyn NetworkSession> =
                    Arc::new(harness.network().session(format!("{}-{}", FAUCET_APP, i)));
                FaucetOrchestrator::standard(harness.config().clone(), session)
            })
            .collect();

        let receipts = join_all(orchestrators.iter().zip(&wallets).map(|(o, w)| {
            o.submit(
                Submission::new(&w.wallet_key, Rating::from_raw(3), "parallel"),
                CancelToken::never(),
            )
        }))
        .await;

        let mut all_tokens = HashSet::new();
        let outcomes = receipts.into_iter().zip(&wallets).zip(&orchestrators);
        for ((receipt, wallet), orchestrator) in outcomes {
            let receipt = receipt.expect("each submission succeeds");
            assert_eq!(receipt.inbox, wallet.inbox);
            assert_eq!(orchestrator.status().state, SubmissionState::Transferred);

            let notifications = harness.sandbox.read_notifications(wallet).unwrap();
            assert_eq!(notifications.len(), 1);
            assert_eq!(notifications[0].coin_ids, receipt.token_ids);
            all_tokens.extend(receipt.token_ids);
        }
        assert_eq!(all_tokens.len(), 12);
        assert_eq!(harness.minted_records(), 12);
        assert_eq!(harness.feedback().len(), 4);
    }

    #[tokio::test]
    async fn test_reload_through_container() {
        let harness = Harness::new(FaucetConfig::for_testing());
        let wallet = harness.sandbox.provision_wallet();
        let config = RuntimeConfig {
            faucet: harness.config().clone(),
            ..RuntimeConfig::default()
        };
        let container = FaucetContainer::bootstrap(config, harness.network())
            .await
            .unwrap();

        let line = format!(
            r#"{{"recipient": "{}", "rating": 5, "comments": "Great app"}}"#,
            wallet.wallet_key
        );
        let submission = SubmissionRequest::parse(&line).unwrap().into_submission();
        let id = submission.submission_id;

        let page = container.orchestrator();
        let result = page.submit(submission, CancelToken::never()).await;
        let outcome = SubmissionOutcome::completed(id, page.status(), result);
        let value: serde_json::Value = serde_json::from_str(&outcome.to_line()).unwrap();
        assert_eq!(value["status"]["state"], "transferred");
        assert_eq!(value["receipt"]["token_ids"].as_array().unwrap().len(), 3);

        // Same page refuses, a reloaded page accepts.
        let refused = page
            .submit(
                Submission::new(&wallet.wallet_key, Rating::none(), ""),
                CancelToken::never(),
            )
            .await;
        assert!(matches!(refused, Err(FaucetError::AlreadyClaimed)));
        container
            .orchestrator()
            .submit(
                Submission::new(&wallet.wallet_key, Rating::none(), ""),
                CancelToken::never(),
            )
            .await
            .unwrap();
        assert_eq!(harness.sandbox.read_notifications(&wallet).unwrap().len(), 2);
    }
}
