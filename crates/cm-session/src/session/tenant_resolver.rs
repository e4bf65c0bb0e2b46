use crate::identity::{IdentityService, Tenant};

use std::sync::Arc;

use log::warn;

/// Looks up public community metadata. Never fails: an unavailable or
/// mismatched record is logged and reported as `None`.
#[derive(Clone)]
pub struct TenantResolver {
    identity: Arc<dyn IdentityService>,
}

impl TenantResolver {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }

    pub async fn resolve(&self, tenant_id: &str) -> Option<Tenant> {
        let mut tenant = match self.identity.fetch_public_tenant(tenant_id).await {
            Ok(tenant) => tenant,
            Err(e) => {
                warn!("Public metadata for community {tenant_id} unavailable: {e}");
                return None;
            }
        };

        if tenant.id.trim().is_empty() {
            tenant.id = tenant_id.to_string();
        } else if tenant.id != tenant_id {
            warn!(
                "Public metadata requested for community {tenant_id} describes community {}; ignoring",
                tenant.id
            );
            return None;
        }

        Some(tenant)
    }
}
