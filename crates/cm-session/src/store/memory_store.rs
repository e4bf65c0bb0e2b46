use crate::store::{DurableStore, StoreKey, StoreResult};

use std::collections::HashMap;
use std::sync::RwLock;

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<StoreKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently present.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned()
    }

    fn set(&self, key: StoreKey, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: StoreKey) -> StoreResult<()> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&key);
        Ok(())
    }
}
