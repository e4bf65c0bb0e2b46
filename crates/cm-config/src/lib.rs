mod config;
mod error;
mod identity_config;
mod log_level;
mod logging_config;
mod store_config;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use identity_config::IdentityConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use store_config::StoreConfig;

const DEFAULT_IDENTITY_BASE_URL: &str = "http://127.0.0.1:8080/api/v1";
const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 15;
const MIN_IDENTITY_TIMEOUT_SECS: u64 = 1;
const MAX_IDENTITY_TIMEOUT_SECS: u64 = 300;
const DEFAULT_STORE_PATH: &str = "session.json";
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
