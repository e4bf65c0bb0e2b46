use std::fmt;

/// The closed set of keys the session layer persists.
///
/// Nothing outside this crate addresses the durable store directly, and
/// nothing inside it can address a key that is not listed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Opaque bearer credential.
    SessionToken,
    /// Identifier of the tenant the session belongs to.
    SessionTenantId,
    /// JSON-serialized public tenant metadata.
    TenantContext,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [
        StoreKey::SessionToken,
        StoreKey::SessionTenantId,
        StoreKey::TenantContext,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SessionToken => "session.token",
            Self::SessionTenantId => "session.tenantId",
            Self::TenantContext => "tenant.context",
        }
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
