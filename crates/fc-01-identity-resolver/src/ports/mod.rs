//! Ports for the Identity Resolver.
//!
//! The only outbound dependency is the store session from `shared-store`,
//! passed into every call.

pub mod inbound;

pub use inbound::RecipientResolver;
