use cm_config::ConfigError;
use cm_session::{ClientError, SessionError, StoreError};

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Session store unavailable: {source} {location}")]
    Store {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Identity client setup failed: {source} {location}")]
    Client {
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },

    #[error("{source}")]
    Session {
        #[source]
        source: SessionError,
        location: ErrorLocation,
    },

    #[error("Logger initialization failed: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Failed to serialize output: {source}")]
    Output {
        #[from]
        source: serde_json::Error,
    },
}

impl CliError {
    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Hint printed under the error, when there is one.
    pub fn recovery_hint(&self) -> Option<&'static str> {
        match self {
            Self::Session { source, .. } => Some(source.recovery_hint()),
            Self::Config { .. } => Some("Check .cm/config.toml and the CM_* environment variables."),
            _ => None,
        }
    }
}

impl From<StoreError> for CliError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ClientError> for CliError {
    #[track_caller]
    fn from(source: ClientError) -> Self {
        Self::Client {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SessionError> for CliError {
    #[track_caller]
    fn from(source: SessionError) -> Self {
        Self::Session {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
