//! # Token Address Sources

use crate::ports::TokenAddressSource;
use parking_lot::Mutex;
use shared_crypto::random_bytes32;
use shared_types::XorName;
use std::collections::VecDeque;

/// Fresh 256-bit names from the OS-seeded CSPRNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomAddressSource;

impl TokenAddressSource for RandomAddressSource {
    fn next_name(&self) -> XorName {
        XorName::new(random_bytes32())
    }
}

/// Hands out a fixed sequence of names, then random ones.
///
/// Used to force address collisions in tests.
#[derive(Debug, Default)]
pub struct ScriptedAddressSource {
    queue: Mutex<VecDeque<XorName>>,
}

impl ScriptedAddressSource {
    pub fn new(names: impl IntoIterator<Item = XorName>) -> Self {
        Self {
            queue: Mutex::new(names.into_iter().collect()),
        }
    }

    /// Names not yet handed out.
    pub fn remaining(&self) -> usize {
        self.queue.lock().len()
    }
}

impl TokenAddressSource for ScriptedAddressSource {
    fn next_name(&self) -> XorName {
        self.queue
            .lock()
            .pop_front()
            .unwrap_or_else(|| RandomAddressSource.next_name())
    }
}
