//! # Outbound Ports

use shared_types::XorName;

/// Supplies the network names new token records are created at.
pub trait TokenAddressSource: Send + Sync {
    fn next_name(&self) -> XorName;
}
