//! Address source adapters.

pub mod address_source;

pub use address_source::{RandomAddressSource, ScriptedAddressSource};
