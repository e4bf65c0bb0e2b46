use crate::identity::{ClientResult, Principal, Tenant};

use async_trait::async_trait;

/// Remote identity service consumed by the session manager.
///
/// Implementations hold the bearer credential; once set it is attached to
/// every subsequent call until cleared.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Fetches the member the current bearer credential belongs to.
    async fn fetch_principal(&self, tenant_id: &str) -> ClientResult<Principal>;

    /// Fetches public community metadata. Requires no credential.
    async fn fetch_public_tenant(&self, tenant_id: &str) -> ClientResult<Tenant>;

    fn set_bearer_token(&self, token: Option<&str>);

    fn has_bearer_token(&self) -> bool;
}
