pub(crate) mod durable_store;
pub(crate) mod error;
pub(crate) mod file_store;
pub(crate) mod memory_store;
pub(crate) mod store_key;

pub use durable_store::DurableStore;
pub use error::{Result as StoreResult, StoreError};
pub use file_store::FileStore;
pub use memory_store::MemoryStore;
pub use store_key::StoreKey;
