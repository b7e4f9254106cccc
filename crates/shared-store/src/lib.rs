//! # Shared Store
//!
//! Boundary to the remote data store.
//!
//! - [`NetworkSession`]: the primitive operations an authorized application
//!   may perform (mutable records, immutable blobs, URI fetch).
//! - [`Authorizer`]: exchanges an [`AppInfo`](shared_types::AppInfo) for a
//!   session.
//! - [`InMemoryNetwork`]: an in-process implementation of both, with
//!   per-operation counters and fault injection.

pub mod errors;
pub mod memory;
pub mod session;

pub use errors::{AuthorizationError, StoreError, StoreResult};
pub use memory::{InMemoryNetwork, InMemorySession, Operation};
pub use session::{validate_app_info, Authorizer, FetchedResource, NetworkSession, ResourceKind};
