//! # Test Fixtures
//!
//! A [`Harness`] owns a sandboxed network with the configured feedback
//! channel already provisioned, and builds orchestrators that share one
//! checkpoint store. Session wrappers observe or steer the calls an
//! orchestrator makes.

use async_trait::async_trait;
use faucet_runtime::{ProvisionedChannel, Sandbox};
use fc_01_identity_resolver::resolver_for;
use fc_02_token_minter::TokenMinter;
use fc_03_notification::Notifier;
use fc_04_feedback_publisher::publisher_for;
use fc_05_orchestrator::{CancelHandle, FaucetOrchestrator, InMemoryCheckpointStore};
use parking_lot::Mutex;
use shared_store::{FetchedResource, InMemoryNetwork, NetworkSession, Operation, StoreResult};
use shared_types::{DataAddress, FaucetConfig, PermissionSet, XorName};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const FAUCET_APP: &str = "thanks-faucet";

pub struct Harness {
    pub sandbox: Sandbox,
    pub channel: ProvisionedChannel,
    pub session: Arc<dyn NetworkSession>,
    pub checkpoints: Arc<InMemoryCheckpointStore>,
}

impl Harness {
    pub fn new(config: FaucetConfig) -> Self {
        Self::with_network(InMemoryNetwork::new(), config)
    }

    pub fn with_network(network: InMemoryNetwork, config: FaucetConfig) -> Self {
        let sandbox = Sandbox::with_network(network, config);
        let channel = sandbox
            .provision_feedback_channel()
            .expect("feedback channel provisioned");
        let session: Arc<dyn NetworkSession> = Arc::new(sandbox.network().session(FAUCET_APP));
        Self {
            sandbox,
            channel,
            session,
            checkpoints: Arc::new(InMemoryCheckpointStore::new()),
        }
    }

    pub fn network(&self) -> &InMemoryNetwork {
        self.sandbox.network()
    }

    pub fn config(&self) -> &FaucetConfig {
        self.sandbox.config()
    }

    pub fn orchestrator(&self) -> FaucetOrchestrator {
        self.orchestrator_on(self.session.clone())
    }

    /// Orchestrator whose calls go through `session`.
    pub fn orchestrator_on(&self, session: Arc<dyn NetworkSession>) -> FaucetOrchestrator {
        let config = self.config().clone();
        self.build(session, TokenMinter::from_config(&config))
    }

    /// Orchestrator using a specific minter.
    pub fn orchestrator_with_minter(&self, minter: TokenMinter) -> FaucetOrchestrator {
        self.build(self.session.clone(), minter)
    }

    fn build(&self, session: Arc<dyn NetworkSession>, minter: TokenMinter) -> FaucetOrchestrator {
        let config = self.config().clone();
        FaucetOrchestrator::new(
            config.clone(),
            session,
            resolver_for(&config),
            Arc::new(minter),
            Arc::new(Notifier::from_config(&config)),
            publisher_for(&config),
            self.checkpoints.clone(),
        )
    }

    /// Feedback bodies delivered so far.
    pub fn feedback(&self) -> Vec<String> {
        self.sandbox
            .read_feedback(&self.channel)
            .expect("feedback readable")
    }

    pub fn minted_records(&self) -> usize {
        self.network().records_with_tag(self.config().coin_type_tag)
    }

    pub fn calls(&self, operation: Operation) -> usize {
        self.network().operations_of(operation)
    }
}

// =============================================================================
// SESSION WRAPPERS
// =============================================================================

/// Requests cancellation right after the `after`-th successful record
/// creation, without yielding in between.
pub struct CancelAfterCreates {
    inner: Arc<dyn NetworkSession>,
    after: usize,
    created: AtomicUsize,
    handle: CancelHandle,
}

impl CancelAfterCreates {
    pub fn new(inner: Arc<dyn NetworkSession>, after: usize, handle: CancelHandle) -> Self {
        Self {
            inner,
            after,
            created: AtomicUsize::new(0),
            handle,
        }
    }
}

#[async_trait]
impl NetworkSession for CancelAfterCreates {
    fn app_id(&self) -> &str {
        self.inner.app_id()
    }

    async fn create_mutable(
        &self,
        address: DataAddress,
        entries: Vec<(String, Vec<u8>)>,
        permissions: PermissionSet,
    ) -> StoreResult<()> {
        let result = self.inner.create_mutable(address, entries, permissions).await;
        if result.is_ok() && self.created.fetch_add(1, Ordering::SeqCst) + 1 == self.after {
            self.handle.cancel();
        }
        result
    }

    async fn get_entry(&self, address: &DataAddress, key: &str) -> StoreResult<Vec<u8>> {
        self.inner.get_entry(address, key).await
    }

    async fn insert_entry(
        &self,
        address: &DataAddress,
        key: &str,
        value: Vec<u8>,
    ) -> StoreResult<()> {
        self.inner.insert_entry(address, key, value).await
    }

    async fn list_keys(&self, address: &DataAddress) -> StoreResult<Vec<String>> {
        self.inner.list_keys(address).await
    }

    async fn put_immutable(&self, content: Vec<u8>) -> StoreResult<XorName> {
        self.inner.put_immutable(content).await
    }

    async fn get_immutable(&self, name: &XorName) -> StoreResult<Vec<u8>> {
        self.inner.get_immutable(name).await
    }

    async fn fetch(&self, uri: &str) -> StoreResult<FetchedResource> {
        self.inner.fetch(uri).await
    }
}

/// Records the kind of every call in order.
pub struct RecordingSession {
    inner: Arc<dyn NetworkSession>,
    log: Mutex<Vec<Operation>>,
}

impl RecordingSession {
    pub fn new(inner: Arc<dyn NetworkSession>) -> Self {
        Self {
            inner,
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn log(&self) -> Vec<Operation> {
        self.log.lock().clone()
    }

    fn record(&self, operation: Operation) {
        self.log.lock().push(operation);
    }
}

#[async_trait]
impl NetworkSession for RecordingSession {
    fn app_id(&self) -> &str {
        self.inner.app_id()
    }

    async fn create_mutable(
        &self,
        address: DataAddress,
        entries: Vec<(String, Vec<u8>)>,
        permissions: PermissionSet,
    ) -> StoreResult<()> {
        self.record(Operation::CreateMutable);
        self.inner.create_mutable(address, entries, permissions).await
    }

    async fn get_entry(&self, address: &DataAddress, key: &str) -> StoreResult<Vec<u8>> {
        self.record(Operation::GetEntry);
        self.inner.get_entry(address, key).await
    }

    async fn insert_entry(
        &self,
        address: &DataAddress,
        key: &str,
        value: Vec<u8>,
    ) -> StoreResult<()> {
        self.record(Operation::InsertEntry);
        self.inner.insert_entry(address, key, value).await
    }

    async fn list_keys(&self, address: &DataAddress) -> StoreResult<Vec<String>> {
        self.record(Operation::ListKeys);
        self.inner.list_keys(address).await
    }

    async fn put_immutable(&self, content: Vec<u8>) -> StoreResult<XorName> {
        self.record(Operation::PutImmutable);
        self.inner.put_immutable(content).await
    }

    async fn get_immutable(&self, name: &XorName) -> StoreResult<Vec<u8>> {
        self.record(Operation::GetImmutable);
        self.inner.get_immutable(name).await
    }

    async fn fetch(&self, uri: &str) -> StoreResult<FetchedResource> {
        self.record(Operation::Fetch);
        self.inner.fetch(uri).await
    }
}
