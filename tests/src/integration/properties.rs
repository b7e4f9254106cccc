//! # Component Guarantees
//!
//! Properties of the individual stages, checked against the sandboxed
//! network with the same wiring the orchestrator uses.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use fc_01_identity_resolver::{
        raw_key_inbox, ProfileResolver, RecipientResolver, ResolutionError,
    };
    use fc_02_token_minter::{
        CoinRecord, MintError, ScriptedAddressSource, TokenMinter, TokenMintingApi,
    };
    use fc_03_notification::{NotificationApi, NotificationError, Notifier};
    use shared_crypto::random_bytes32;
    use shared_store::Operation;
    use shared_types::{record_keys, DataAddress, FaucetConfig, XorName};
    use std::collections::HashSet;
    use std::sync::Arc;

    // =============================================================================
    // MINT
    // =============================================================================

    #[tokio::test]
    async fn test_mint_zero_is_free() {
        let harness = Harness::new(FaucetConfig::default());
        let tokens = TokenMinter::from_config(harness.config())
            .mint(harness.session.as_ref(), "pk", 0)
            .await
            .unwrap();

        assert!(tokens.is_empty());
        assert_eq!(harness.network().operation_count(), 0);
    }

    #[tokio::test]
    async fn test_minted_tokens_are_distinct_and_owned() {
        let harness = Harness::new(FaucetConfig::default());
        for count in [1usize, 2, 6] {
            let owner = format!("owner-{}", count);
            let tokens = TokenMinter::from_config(harness.config())
                .mint(harness.session.as_ref(), &owner, count)
                .await
                .unwrap();

            assert_eq!(tokens.len(), count);
            assert_eq!(tokens.iter().collect::<HashSet<_>>().len(), count);
            for token in tokens {
                let address = DataAddress::new(token.name(), harness.config().coin_type_tag);
                let data = harness.network().entries(&address).unwrap()[0].1.clone();
                assert_eq!(CoinRecord::from_json(&data).unwrap().owner, owner);
            }
        }
        assert_eq!(harness.minted_records(), 9);
    }

    #[tokio::test]
    async fn test_forced_collision_does_not_overwrite() {
        let harness = Harness::new(FaucetConfig::default());
        let name = XorName::new(random_bytes32());
        let scripted = || {
            TokenMinter::from_config(harness.config())
                .with_address_source(Arc::new(ScriptedAddressSource::new([name])))
        };

        scripted()
            .mint(harness.session.as_ref(), "first", 1)
            .await
            .unwrap();
        let result = scripted().mint(harness.session.as_ref(), "second", 1).await;

        match result {
            Err(MintError::Conflict { minted, .. }) => assert!(minted.is_empty()),
            other => panic!("expected conflict, got {:?}", other),
        }
        let address = DataAddress::new(name, harness.config().coin_type_tag);
        let data = harness.network().entries(&address).unwrap()[0].1.clone();
        assert_eq!(CoinRecord::from_json(&data).unwrap().owner, "first");
        assert_eq!(harness.minted_records(), 1);
    }

    // =============================================================================
    // RESOLVE
    // =============================================================================

    #[tokio::test]
    async fn test_blank_identifier_makes_no_calls() {
        let harness = Harness::new(FaucetConfig::default());
        let resolver = ProfileResolver::new(harness.config().inbox_type_tag);

        for blank in ["", "   ", "\t\n"] {
            let result = resolver.resolve(harness.session.as_ref(), blank).await;
            assert!(matches!(result, Err(ResolutionError::EmptyIdentifier)));
        }
        assert_eq!(harness.network().operation_count(), 0);
    }

    #[tokio::test]
    async fn test_raw_key_derivation_is_deterministic() {
        let harness = Harness::new(FaucetConfig::default());
        let wallet = harness.sandbox.provision_wallet();
        let resolver = ProfileResolver::new(harness.config().inbox_type_tag);

        let first = resolver
            .resolve(harness.session.as_ref(), &wallet.wallet_key)
            .await
            .unwrap();
        let second = resolver
            .resolve(harness.session.as_ref(), &wallet.wallet_key.to_uppercase())
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(
            first.inbox,
            raw_key_inbox(&wallet.wallet_key, harness.config().inbox_type_tag)
        );
        assert_eq!(harness.calls(Operation::Fetch), 0);
    }

    // =============================================================================
    // NOTIFY
    // =============================================================================

    #[tokio::test]
    async fn test_each_notification_adds_one_entry() {
        let harness = Harness::new(FaucetConfig::default());
        let wallet = harness.sandbox.provision_wallet();
        let recipient = ProfileResolver::new(harness.config().inbox_type_tag)
            .resolve(harness.session.as_ref(), &wallet.wallet_key)
            .await
            .unwrap();
        let notifier = Notifier::from_config(harness.config());

        let mut previous = harness.network().entries(&wallet.inbox).unwrap();
        for round in 0..3 {
            notifier
                .notify(harness.session.as_ref(), &recipient, &[])
                .await
                .unwrap();

            let current = harness.network().entries(&wallet.inbox).unwrap();
            assert_eq!(current.len(), previous.len() + 1, "round {}", round);
            assert_eq!(&current[..previous.len()], &previous[..]);
            previous = current;
        }
        assert_eq!(harness.sandbox.read_notifications(&wallet).unwrap().len(), 3);
        assert!(previous
            .iter()
            .any(|(key, _)| key == record_keys::INBOX_ENC_PK));
    }

    #[tokio::test]
    async fn test_redelivery_is_refused() {
        let harness = Harness::new(FaucetConfig::default());
        let wallet = harness.sandbox.provision_wallet();
        let recipient = ProfileResolver::new(harness.config().inbox_type_tag)
            .resolve(harness.session.as_ref(), &wallet.wallet_key)
            .await
            .unwrap();
        let notifier = Notifier::from_config(harness.config());
        let notification = notifier.compose(&[]);

        notifier
            .deliver(harness.session.as_ref(), &recipient, &notification)
            .await
            .unwrap();
        let again = notifier
            .deliver(harness.session.as_ref(), &recipient, &notification)
            .await;

        assert!(matches!(
            again,
            Err(NotificationError::AlreadyDelivered { .. })
        ));
        assert_eq!(harness.sandbox.read_notifications(&wallet).unwrap().len(), 1);
    }
}
