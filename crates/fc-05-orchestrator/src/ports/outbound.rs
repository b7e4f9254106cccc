//! # Outbound Ports

use crate::domain::{Checkpoint, CheckpointKey};

/// Persists submission progress so a retry can resume.
pub trait CheckpointStore: Send + Sync {
    fn load(&self, key: &CheckpointKey) -> Option<Checkpoint>;

    fn save(&self, key: &CheckpointKey, checkpoint: &Checkpoint);

    fn remove(&self, key: &CheckpointKey);
}
