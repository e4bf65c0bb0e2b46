use crate::identity::lenient_id;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The authenticated member, scoped to exactly one community.
///
/// `id` deserializes leniently: a missing, null or non-string id becomes an
/// empty string so that [`Principal::has_valid_id`] can reject it as corrupt
/// data rather than failing the whole decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Any other fields the identity service returned.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Principal {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            photo: None,
            role: None,
            attributes: Map::new(),
        }
    }

    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}
