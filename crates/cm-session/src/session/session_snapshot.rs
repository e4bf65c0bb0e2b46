use crate::identity::{Principal, Tenant};
use crate::session::SessionState;

use serde::Serialize;

/// Everything consumers can observe about the session at one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub principal: Option<Principal>,
    pub tenant_context: Option<Tenant>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }
}
