pub(crate) mod rollback;
pub(crate) mod session_manager;
pub(crate) mod session_snapshot;
pub(crate) mod session_state;
pub(crate) mod tenant_resolver;

pub use session_manager::SessionManager;
pub use session_snapshot::SessionSnapshot;
pub use session_state::SessionState;
pub use tenant_resolver::TenantResolver;
