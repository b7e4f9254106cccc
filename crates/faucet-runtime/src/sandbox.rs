//! # Local Sandbox
//!
//! Provisions the records a faucet run needs on an [`InMemoryNetwork`]:
//! recipient wallets, profile documents and feedback channels. Also reads
//! them back the way a wallet or a feedback reader would.

use fc_01_identity_resolver::raw_key_inbox;
use fc_03_notification::{NotificationResult, TransactionNotification};
use fc_04_feedback_publisher::{EmailMessage, MailboxPublisher, PublishError, ServiceLocator};
use shared_crypto::{random_bytes32, CryptoError, EncryptionKeyPair};
use shared_store::InMemoryNetwork;
use shared_types::{
    record_keys, vocab, Action, DataAddress, FaucetConfig, FeedbackChannel, Grantee, Graph,
    PermissionSet, Term, TypeTag, XorName,
};

/// Record kind of sandbox feedback mailboxes.
pub const MAILBOX_TYPE_TAG: TypeTag = 15_003;
/// Record kind of sandbox social outboxes.
pub const OUTBOX_TYPE_TAG: TypeTag = 30_303;

const WALLET_APP: &str = "sandbox-wallet";
const MAIL_APP: &str = "sandbox-mail";

/// A recipient wallet with its transaction inbox.
pub struct ProvisionedWallet {
    /// Raw wallet key (64 hex chars); also the owner key of minted tokens.
    pub wallet_key: String,
    /// Key pair that opens notifications.
    pub keys: EncryptionKeyPair,
    pub inbox: DataAddress,
}

/// A feedback mailbox reachable through a channel id.
pub struct ProvisionedMailbox {
    pub channel_id: String,
    pub mailbox: DataAddress,
    pub keys: EncryptionKeyPair,
}

/// The feedback destination set up for the configured channel.
pub enum ProvisionedChannel {
    Mailbox(ProvisionedMailbox),
    Outbox(DataAddress),
}

/// How a provisioned profile points at its inbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileLink {
    /// `ldp:inbox` IRI.
    Inbox,
    /// Legacy `xorName` / `typeTag` literals.
    Legacy,
    /// No link at all.
    None,
}

/// Provisioning helpers over a shared in-memory network.
#[derive(Clone)]
pub struct Sandbox {
    network: InMemoryNetwork,
    config: FaucetConfig,
}

impl Sandbox {
    pub fn new(config: FaucetConfig) -> Self {
        Self::with_network(InMemoryNetwork::new(), config)
    }

    pub fn with_network(network: InMemoryNetwork, config: FaucetConfig) -> Self {
        Self { network, config }
    }

    pub fn network(&self) -> &InMemoryNetwork {
        &self.network
    }

    pub fn config(&self) -> &FaucetConfig {
        &self.config
    }

    /// A wallet whose inbox lives at the raw-key derived address.
    pub fn provision_wallet(&self) -> ProvisionedWallet {
        let wallet_key = hex::encode(random_bytes32());
        let inbox = raw_key_inbox(&wallet_key, self.config.inbox_type_tag);
        self.provision_wallet_at(wallet_key, inbox)
    }

    /// A wallet whose inbox lives at an arbitrary address, reachable only
    /// through a profile link.
    pub fn provision_linked_wallet(&self) -> ProvisionedWallet {
        let wallet_key = hex::encode(random_bytes32());
        let inbox = DataAddress::new(XorName::new(random_bytes32()), self.config.inbox_type_tag);
        self.provision_wallet_at(wallet_key, inbox)
    }

    fn provision_wallet_at(&self, wallet_key: String, inbox: DataAddress) -> ProvisionedWallet {
        let keys = EncryptionKeyPair::generate();
        self.network.seed_mutable(
            inbox,
            WALLET_APP,
            vec![
                (record_keys::INBOX_WALLET_PK.to_string(), wallet_key.clone().into_bytes()),
                (
                    record_keys::INBOX_ENC_PK.to_string(),
                    keys.public_key().to_hex().into_bytes(),
                ),
            ],
            PermissionSet::new().allow(Grantee::Anyone, &[Action::Insert]),
        );
        ProvisionedWallet {
            wallet_key,
            keys,
            inbox,
        }
    }

    /// Publish a profile document at `uri` pointing at `wallet`'s inbox.
    pub fn provision_profile(&self, uri: &str, wallet: &ProvisionedWallet, link: ProfileLink) {
        let mut profile = Graph::new()
            .with(uri, vocab::RDF_TYPE, Term::iri(vocab::FOAF_PERSON))
            .with(uri, vocab::FOAF_NAME, Term::literal("Sandbox User"));
        match link {
            ProfileLink::Inbox => {
                profile.add(uri, vocab::LDP_INBOX, Term::iri(wallet.inbox.to_uri()));
            }
            ProfileLink::Legacy => {
                profile.add(uri, vocab::SAFE_XOR_NAME, Term::literal(wallet.inbox.name.to_hex()));
                profile.add(
                    uri,
                    vocab::SAFE_TYPE_TAG,
                    Term::literal(wallet.inbox.type_tag.to_string()),
                );
            }
            ProfileLink::None => {}
        }
        self.network.publish_document(uri, profile);
    }

    /// A mailbox plus the service directory entry that leads to it.
    pub fn provision_mailbox(&self, channel_id: &str) -> Result<ProvisionedMailbox, PublishError> {
        let locator = ServiceLocator::parse(channel_id)?;
        let keys = EncryptionKeyPair::generate();
        let mailbox = DataAddress::new(XorName::new(random_bytes32()), MAILBOX_TYPE_TAG);

        self.network.seed_mutable(
            mailbox,
            MAIL_APP,
            vec![(
                record_keys::EMAIL_ENC_PK.to_string(),
                keys.public_key().to_hex().into_bytes(),
            )],
            PermissionSet::new().allow(Grantee::Anyone, &[Action::Insert]),
        );

        let services =
            MailboxPublisher::services_address(&locator.public_id, self.config.dns_type_tag);
        let pointer = serde_json::to_vec(&mailbox).map_err(|e| PublishError::Encoding(e.to_string()))?;
        let mut entries = self.network.entries(&services).unwrap_or_default();
        entries.retain(|(key, _)| key != &locator.service_name);
        entries.push((locator.service_name, pointer));
        self.network
            .seed_mutable(services, MAIL_APP, entries, PermissionSet::new());

        Ok(ProvisionedMailbox {
            channel_id: channel_id.to_string(),
            mailbox,
            keys,
        })
    }

    /// A profile at `target_uri` with an open outbox.
    pub fn provision_outbox(&self, target_uri: &str) -> DataAddress {
        let outbox = DataAddress::new(XorName::new(random_bytes32()), OUTBOX_TYPE_TAG);
        self.network.seed_mutable(
            outbox,
            MAIL_APP,
            vec![],
            PermissionSet::new().allow(Grantee::Anyone, &[Action::Insert]),
        );
        self.network.publish_document(
            target_uri,
            Graph::new().with(target_uri, vocab::AS_OUTBOX, Term::iri(outbox.to_uri())),
        );
        outbox
    }

    /// Provision whatever `config.feedback` points at.
    pub fn provision_feedback_channel(&self) -> Result<ProvisionedChannel, PublishError> {
        match &self.config.feedback {
            FeedbackChannel::Mailbox { channel_id } => {
                self.provision_mailbox(channel_id).map(ProvisionedChannel::Mailbox)
            }
            FeedbackChannel::SocialPost { target_uri, .. } => {
                Ok(ProvisionedChannel::Outbox(self.provision_outbox(target_uri)))
            }
        }
    }

    /// Decrypt every notification in `wallet`'s inbox, oldest first.
    pub fn read_notifications(
        &self,
        wallet: &ProvisionedWallet,
    ) -> NotificationResult<Vec<TransactionNotification>> {
        self.network
            .entries(&wallet.inbox)
            .unwrap_or_default()
            .iter()
            .filter(|(key, _)| !key.starts_with("__"))
            .map(|(_, sealed)| TransactionNotification::open(&wallet.keys, sealed))
            .collect()
    }

    /// Feedback bodies delivered to `channel`, oldest first.
    pub fn read_feedback(&self, channel: &ProvisionedChannel) -> Result<Vec<String>, CryptoError> {
        match channel {
            ProvisionedChannel::Mailbox(mailbox) => {
                let mut bodies = Vec::new();
                for (key, pointer) in self.network.entries(&mailbox.mailbox).unwrap_or_default() {
                    if key.starts_with("__") {
                        continue;
                    }
                    let name = String::from_utf8(mailbox.keys.open(&pointer)?)
                        .ok()
                        .and_then(|hex| XorName::from_hex(&hex).ok());
                    let email = name
                        .and_then(|name| self.network.immutable(&name))
                        .map(|blob| mailbox.keys.open(&blob))
                        .transpose()?
                        .and_then(|plain| serde_json::from_slice::<EmailMessage>(&plain).ok());
                    if let Some(email) = email {
                        bodies.push(email.body);
                    }
                }
                Ok(bodies)
            }
            ProvisionedChannel::Outbox(outbox) => Ok(self
                .network
                .entries(outbox)
                .unwrap_or_default()
                .into_iter()
                .map(|(_, triples)| String::from_utf8_lossy(&triples).into_owned())
                .collect()),
        }
    }
}
