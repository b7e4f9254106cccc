use crate::domain::{Checkpoint, CheckpointKey};
use crate::ports::CheckpointStore;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Process-local checkpoint store.
#[derive(Debug, Default)]
pub struct InMemoryCheckpointStore {
    checkpoints: RwLock<HashMap<CheckpointKey, Checkpoint>>,
}

impl InMemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.checkpoints.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.read().is_empty()
    }
}

impl CheckpointStore for InMemoryCheckpointStore {
    fn load(&self, key: &CheckpointKey) -> Option<Checkpoint> {
        self.checkpoints.read().get(key).cloned()
    }

    fn save(&self, key: &CheckpointKey, checkpoint: &Checkpoint) {
        self.checkpoints
            .write()
            .insert(key.clone(), checkpoint.clone());
    }

    fn remove(&self, key: &CheckpointKey) {
        self.checkpoints.write().remove(key);
    }
}
