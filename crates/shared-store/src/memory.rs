//! # In-Memory Network
//!
//! Process-local stand-in for the remote data store. Used by the sandbox
//! runtime and by every test suite in the workspace.
//!
//! Every session call is counted per [`Operation`] so callers can assert
//! how many round-trips a workflow made. Faults can be queued with
//! [`InMemoryNetwork::fail_nth`] to make a specific future call fail.
//! Seeding and inspection helpers bypass the counters.

use crate::errors::{AuthorizationError, StoreError, StoreResult};
use crate::session::{validate_app_info, Authorizer, FetchedResource, NetworkSession};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_crypto::sha3_256;
use shared_types::{Action, AppInfo, DataAddress, Graph, PermissionSet, XorName, URI_SCHEME};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Session operations tracked by the network counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateMutable,
    GetEntry,
    InsertEntry,
    ListKeys,
    PutImmutable,
    GetImmutable,
    Fetch,
}

struct MutableRecord {
    owner: String,
    entries: Vec<(String, Vec<u8>)>,
    permissions: PermissionSet,
}

impl MutableRecord {
    fn may_insert(&self, app_id: &str) -> bool {
        self.owner == app_id || self.permissions.permits(app_id, Action::Insert)
    }
}

struct QueuedFault {
    operation: Operation,
    /// Value of the operation counter at which the fault fires.
    at_call: usize,
    error: StoreError,
}

#[derive(Default)]
struct NetworkState {
    mutable: HashMap<DataAddress, MutableRecord>,
    immutable: HashMap<XorName, Vec<u8>>,
    resources: HashMap<String, FetchedResource>,
    counts: HashMap<Operation, usize>,
    total: usize,
    faults: Vec<QueuedFault>,
    auth_failure: Option<AuthorizationError>,
}

impl NetworkState {
    /// Count one call and pop a fault scheduled for it, if any.
    fn record(&mut self, operation: Operation) -> StoreResult<()> {
        self.total += 1;
        let count = self.counts.entry(operation).or_insert(0);
        *count += 1;
        let current = *count;

        if let Some(pos) = self
            .faults
            .iter()
            .position(|f| f.operation == operation && f.at_call == current)
        {
            let fault = self.faults.remove(pos);
            debug!(?operation, call = current, error = %fault.error, "Injected fault");
            return Err(fault.error);
        }
        Ok(())
    }

    fn record_at(&self, address: &DataAddress) -> StoreResult<&MutableRecord> {
        self.mutable
            .get(address)
            .ok_or(StoreError::NoSuchData { address: *address })
    }
}

/// Shared in-process network. Cloning yields another handle to the same state.
#[derive(Clone, Default)]
pub struct InMemoryNetwork {
    state: Arc<RwLock<NetworkState>>,
    latency: Option<Duration>,
}

impl InMemoryNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every session call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Open a session acting for `app_id` without going through authorization.
    pub fn session(&self, app_id: impl Into<String>) -> InMemorySession {
        InMemorySession {
            network: self.clone(),
            app_id: app_id.into(),
        }
    }

    /// Make the `n`-th future call of `operation` (1-based) fail with `error`.
    pub fn fail_nth(&self, operation: Operation, n: usize, error: StoreError) {
        let mut state = self.state.write();
        let current = state.counts.get(&operation).copied().unwrap_or(0);
        state.faults.push(QueuedFault {
            operation,
            at_call: current + n.max(1),
            error,
        });
    }

    /// Make every future authorization request fail with `Denied`.
    pub fn deny_authorisation(&self) {
        self.state.write().auth_failure = Some(AuthorizationError::Denied {
            app_id: String::new(),
        });
    }

    /// Make every future authorization request fail with `error`.
    pub fn reject_authorisation(&self, error: AuthorizationError) {
        self.state.write().auth_failure = Some(error);
    }

    // =========================================================================
    // Seeding (not counted)
    // =========================================================================

    /// Create a record owned by `owner`. Replaces any record at `address`.
    pub fn seed_mutable(
        &self,
        address: DataAddress,
        owner: impl Into<String>,
        entries: Vec<(String, Vec<u8>)>,
        permissions: PermissionSet,
    ) {
        self.state.write().mutable.insert(
            address,
            MutableRecord {
                owner: owner.into(),
                entries,
                permissions,
            },
        );
    }

    /// Publish a linked-data document at `uri`.
    pub fn publish_document(&self, uri: impl Into<String>, document: Graph) {
        self.publish_resource(uri, FetchedResource::Document(document));
    }

    /// Publish an arbitrary resource at `uri`.
    pub fn publish_resource(&self, uri: impl Into<String>, resource: FetchedResource) {
        self.state.write().resources.insert(uri.into(), resource);
    }

    // =========================================================================
    // Inspection (not counted)
    // =========================================================================

    /// Entries of the record at `address`, in insertion order.
    pub fn entries(&self, address: &DataAddress) -> Option<Vec<(String, Vec<u8>)>> {
        self.state
            .read()
            .mutable
            .get(address)
            .map(|r| r.entries.clone())
    }

    /// Number of entries at `address`; 0 when the record does not exist.
    pub fn entry_count(&self, address: &DataAddress) -> usize {
        self.state
            .read()
            .mutable
            .get(address)
            .map_or(0, |r| r.entries.len())
    }

    pub fn contains(&self, address: &DataAddress) -> bool {
        self.state.read().mutable.contains_key(address)
    }

    /// Number of mutable records with the given type tag.
    pub fn records_with_tag(&self, type_tag: u64) -> usize {
        self.state
            .read()
            .mutable
            .keys()
            .filter(|a| a.type_tag == type_tag)
            .count()
    }

    pub fn immutable(&self, name: &XorName) -> Option<Vec<u8>> {
        self.state.read().immutable.get(name).cloned()
    }

    /// Total session calls made so far.
    pub fn operation_count(&self) -> usize {
        self.state.read().total
    }

    /// Session calls of one kind made so far.
    pub fn operations_of(&self, operation: Operation) -> usize {
        self.state
            .read()
            .counts
            .get(&operation)
            .copied()
            .unwrap_or(0)
    }

    async fn simulate_latency(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl Authorizer for InMemoryNetwork {
    async fn authorise(
        &self,
        app: &AppInfo,
    ) -> Result<Arc<dyn NetworkSession>, AuthorizationError> {
        validate_app_info(app)?;
        if let Some(failure) = self.state.read().auth_failure.clone() {
            return Err(match failure {
                AuthorizationError::Denied { .. } => AuthorizationError::Denied {
                    app_id: app.id.clone(),
                },
                other => other,
            });
        }
        debug!(app_id = %app.id, "Session authorised");
        Ok(Arc::new(self.session(app.id.clone())))
    }
}

/// A session on an [`InMemoryNetwork`].
#[derive(Clone)]
pub struct InMemorySession {
    network: InMemoryNetwork,
    app_id: String,
}

impl InMemorySession {
    pub fn network(&self) -> &InMemoryNetwork {
        &self.network
    }
}

#[async_trait]
impl NetworkSession for InMemorySession {
    fn app_id(&self) -> &str {
        &self.app_id
    }

    async fn create_mutable(
        &self,
        address: DataAddress,
        entries: Vec<(String, Vec<u8>)>,
        permissions: PermissionSet,
    ) -> StoreResult<()> {
        self.network.simulate_latency().await;
        let mut state = self.network.state.write();
        state.record(Operation::CreateMutable)?;

        if state.mutable.contains_key(&address) {
            return Err(StoreError::DataExists { address });
        }
        debug!(%address, entries = entries.len(), "create_mutable");
        state.mutable.insert(
            address,
            MutableRecord {
                owner: self.app_id.clone(),
                entries,
                permissions,
            },
        );
        Ok(())
    }

    async fn get_entry(&self, address: &DataAddress, key: &str) -> StoreResult<Vec<u8>> {
        self.network.simulate_latency().await;
        let mut state = self.network.state.write();
        state.record(Operation::GetEntry)?;

        let record = state.record_at(address)?;
        debug!(%address, key, "get_entry");
        record
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| StoreError::NoSuchEntry {
                address: *address,
                key: key.to_string(),
            })
    }

    async fn insert_entry(
        &self,
        address: &DataAddress,
        key: &str,
        value: Vec<u8>,
    ) -> StoreResult<()> {
        self.network.simulate_latency().await;
        let mut state = self.network.state.write();
        state.record(Operation::InsertEntry)?;

        let record = state
            .mutable
            .get_mut(address)
            .ok_or(StoreError::NoSuchData { address: *address })?;
        if !record.may_insert(&self.app_id) {
            return Err(StoreError::PermissionDenied { address: *address });
        }
        if record.entries.iter().any(|(k, _)| k == key) {
            return Err(StoreError::EntryExists {
                address: *address,
                key: key.to_string(),
            });
        }
        debug!(%address, key, bytes = value.len(), "insert_entry");
        record.entries.push((key.to_string(), value));
        Ok(())
    }

    async fn list_keys(&self, address: &DataAddress) -> StoreResult<Vec<String>> {
        self.network.simulate_latency().await;
        let mut state = self.network.state.write();
        state.record(Operation::ListKeys)?;

        let record = state.record_at(address)?;
        Ok(record.entries.iter().map(|(k, _)| k.clone()).collect())
    }

    async fn put_immutable(&self, content: Vec<u8>) -> StoreResult<XorName> {
        self.network.simulate_latency().await;
        let mut state = self.network.state.write();
        state.record(Operation::PutImmutable)?;

        let name = XorName::new(sha3_256(&content));
        debug!(%name, bytes = content.len(), "put_immutable");
        state.immutable.insert(name, content);
        Ok(name)
    }

    async fn get_immutable(&self, name: &XorName) -> StoreResult<Vec<u8>> {
        self.network.simulate_latency().await;
        let mut state = self.network.state.write();
        state.record(Operation::GetImmutable)?;

        state
            .immutable
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                uri: format!("{}{}", URI_SCHEME, name),
            })
    }

    async fn fetch(&self, uri: &str) -> StoreResult<FetchedResource> {
        self.network.simulate_latency().await;
        let mut state = self.network.state.write();
        state.record(Operation::Fetch)?;
        debug!(uri, "fetch");

        if let Some(resource) = state.resources.get(uri) {
            return Ok(resource.clone());
        }
        if let Ok(address) = DataAddress::parse_uri(uri) {
            if state.mutable.contains_key(&address) {
                return Ok(FetchedResource::MutableData(address));
            }
        }
        if let Some(name) = uri
            .strip_prefix(URI_SCHEME)
            .and_then(|hex| XorName::from_hex(hex).ok())
        {
            if let Some(content) = state.immutable.get(&name) {
                return Ok(FetchedResource::ImmutableData(content.clone()));
            }
        }
        Err(StoreError::NotFound {
            uri: uri.to_string(),
        })
    }
}
