//! Checkpoint store adapters.

pub mod memory;

pub use memory::InMemoryCheckpointStore;
