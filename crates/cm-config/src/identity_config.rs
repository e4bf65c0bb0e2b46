use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_IDENTITY_BASE_URL, DEFAULT_IDENTITY_TIMEOUT_SECS,
    MAX_IDENTITY_TIMEOUT_SECS, MIN_IDENTITY_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Where the identity service lives and how long to wait for it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_IDENTITY_BASE_URL),
            timeout_secs: DEFAULT_IDENTITY_TIMEOUT_SECS,
        }
    }
}

impl IdentityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::identity(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if !(MIN_IDENTITY_TIMEOUT_SECS..=MAX_IDENTITY_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::identity(format!(
                "timeout_secs must be between {} and {}, got {}",
                MIN_IDENTITY_TIMEOUT_SECS, MAX_IDENTITY_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        Ok(())
    }
}
