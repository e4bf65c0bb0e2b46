pub(crate) mod error;
pub(crate) mod http_identity_client;
pub(crate) mod identity_service;
pub(crate) mod principal;
pub(crate) mod tenant;

pub use error::{ClientError, Result as ClientResult};
pub use http_identity_client::HttpIdentityClient;
pub use identity_service::IdentityService;
pub use principal::Principal;
pub use tenant::Tenant;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts string or numeric ids; anything else becomes an empty id.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}
