use serde::Serialize;

/// Lifecycle state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No session; the initial state
    #[default]
    Unauthenticated,
    /// Re-validating a stored session at startup
    Bootstrapping,
    /// Credentials written, waiting for the member record
    Authenticating,
    /// Member record confirmed
    Authenticated,
}

impl SessionState {
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Bootstrapping | Self::Authenticating)
    }
}
