use crate::identity::{ClientError, ClientResult, IdentityService, Principal, Tenant};

use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as ReqwestClient, Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP client for the community identity REST API
pub struct HttpIdentityClient {
    base_url: String,
    bearer: RwLock<Option<String>>,
    client: ReqwestClient,
}

impl HttpIdentityClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Identity service URL (e.g., "https://api.example.com/v1")
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, ReqwestClient::new())
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    fn with_client(base_url: &str, client: ReqwestClient) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: RwLock::new(None),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Append `segments` to the base URL, each percent-encoded as a single
    /// path segment.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::invalid_request(format!("invalid base URL '{}': {e}", self.base_url))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::invalid_request(format!(
                    "base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Build a request, attaching the bearer credential when one is set
    fn request(&self, method: Method, segments: &[&str]) -> ClientResult<reqwest::RequestBuilder> {
        let mut req = self.client.request(method, self.endpoint(segments)?);

        if let Some(ref token) = *self.bearer.read().unwrap_or_else(|e| e.into_inner()) {
            req = req.bearer_auth(token);
        }

        Ok(req)
    }

    /// Execute request, mapping non-2xx responses to `ClientError::Api`
    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let body: Option<Value> = serde_json::from_slice(&bytes).ok();
            let error = body.as_ref().and_then(|b| b.get("error"));

            let code = error
                .and_then(|e| e.get("code"))
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));
            let message = error
                .and_then(|e| e.get("message"))
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            return Err(ClientError::api_error(status.as_u16(), code, message));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl IdentityService for HttpIdentityClient {
    async fn fetch_principal(&self, tenant_id: &str) -> ClientResult<Principal> {
        debug!("Fetching principal for community {tenant_id}");
        let tenant_id = checked_tenant_id(tenant_id)?;
        let req = self.request(Method::GET, &["communities", tenant_id, "members", "me"])?;
        self.execute(req).await
    }

    async fn fetch_public_tenant(&self, tenant_id: &str) -> ClientResult<Tenant> {
        debug!("Fetching public metadata for community {tenant_id}");
        let tenant_id = checked_tenant_id(tenant_id)?;
        let req = self.request(Method::GET, &["communities", tenant_id, "public"])?;
        self.execute(req).await
    }

    fn set_bearer_token(&self, token: Option<&str>) {
        *self.bearer.write().unwrap_or_else(|e| e.into_inner()) = token.map(String::from);
    }

    fn has_bearer_token(&self) -> bool {
        self.bearer
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}

/// Dot segments would be dropped from the path rather than encoded, so
/// they can never name a community.
fn checked_tenant_id(tenant_id: &str) -> ClientResult<&str> {
    match tenant_id.trim() {
        "" | "." | ".." => Err(ClientError::invalid_request(format!(
            "'{tenant_id}' is not a valid community id"
        ))),
        _ => Ok(tenant_id),
    }
}
