//! Session and community-context management for the community admin client.
//!
//! [`SessionManager`] owns who is signed in and which community is active,
//! keeps both mirrored into a [`DurableStore`], and re-validates the stored
//! session against an [`IdentityService`] on startup.

pub mod error;
pub mod identity;
pub mod session;
pub mod store;

pub use error::{Result as SessionResult, SessionError};
pub use identity::{ClientError, ClientResult, HttpIdentityClient, IdentityService, Principal, Tenant};
pub use session::{SessionManager, SessionSnapshot, SessionState, TenantResolver};
pub use store::{DurableStore, FileStore, MemoryStore, StoreError, StoreKey, StoreResult};

#[cfg(test)]
mod tests;
