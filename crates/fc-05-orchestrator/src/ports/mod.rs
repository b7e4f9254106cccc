//! Ports for the Transaction Orchestrator.

pub mod inbound;
pub mod outbound;

pub use inbound::FaucetApi;
pub use outbound::CheckpointStore;
