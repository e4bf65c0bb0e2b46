use crate::store::{StoreKey, StoreResult};

/// Synchronous key-value storage that survives application reloads.
///
/// A missing key is `None`, never an error. Writes may fail for backends
/// that touch the filesystem.
pub trait DurableStore: Send + Sync {
    fn get(&self, key: StoreKey) -> Option<String>;

    fn set(&self, key: StoreKey, value: &str) -> StoreResult<()>;

    fn remove(&self, key: StoreKey) -> StoreResult<()>;
}
