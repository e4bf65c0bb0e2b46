use crate::identity::ClientError;
use crate::store::StoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors surfaced by [`crate::SessionManager`] operations.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Identity service call failed: {source} {location}")]
    Identity {
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("Invalid member record: {message} {location}")]
    InvalidPrincipal {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid credentials: {message} {location}")]
    InvalidCredentials {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session store write failed: {source} {location}")]
    Store {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Another session operation is already in flight {location}")]
    OperationInProgress { location: ErrorLocation },

    #[error("Session operation superseded by logout {location}")]
    Superseded { location: ErrorLocation },
}

impl SessionError {
    /// User-friendly recovery hint.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::Identity { source, .. } if source.is_unauthorized() => {
                "Your sign-in was rejected. Check your credentials and try again."
            }
            Self::Identity { .. } => {
                "Unable to reach the identity service. \
                   Check your connection and try again."
            }
            Self::InvalidPrincipal { .. } => {
                "The identity service returned an incomplete member record. \
                   Please report this issue."
            }
            Self::InvalidCredentials { .. } => "A token and a community are both required.",
            Self::Store { .. } => {
                "Unable to save the session locally. \
                   Check disk space and file permissions."
            }
            Self::OperationInProgress { .. } => {
                "Another session operation is still running. \
                   Wait for it to finish and try again."
            }
            Self::Superseded { .. } => "The sign-in was cancelled by a logout.",
        }
    }

    /// Creates InvalidPrincipal error at caller location.
    #[track_caller]
    pub fn invalid_principal(message: impl Into<String>) -> Self {
        Self::InvalidPrincipal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidCredentials error at caller location.
    #[track_caller]
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::InvalidCredentials {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates OperationInProgress error at caller location.
    #[track_caller]
    pub fn operation_in_progress() -> Self {
        Self::OperationInProgress {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Superseded error at caller location.
    #[track_caller]
    pub fn superseded() -> Self {
        Self::Superseded {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ClientError> for SessionError {
    #[track_caller]
    fn from(source: ClientError) -> Self {
        Self::Identity {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for SessionError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
