//! High-level CRM client: credentials plus HTTP infrastructure.
//!
//! One `CrmClient` serves one logical caller; credentials are immutable for
//! the lifetime of the instance and the client holds no mutable per-call
//! state, so it is safe for concurrent use. The API key is redacted in
//! Debug output.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::instrument;

use crate::client::HttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::ApiRequest;
use crate::retry::RetryConfig;

/// Authenticated client for one CRM instance.
#[derive(Clone)]
pub struct CrmClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for CrmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl CrmClient {
    /// Create a new client with default configuration.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, api_key, ClientConfig::default())
    }

    /// Create a new client with custom configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = HttpClient::new(config)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Get the base URL (trailing slash stripped).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Build the full URL for an endpoint path.
    ///
    /// Paths starting with a scheme are used as-is; anything else is joined
    /// to the base URL without doubling slashes.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        }
    }

    /// Execute a request with the client's default retry configuration.
    #[instrument(skip(self, request), fields(method = ?request.method(), path = %request.path()))]
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        self.request_with(request, None).await
    }

    /// Execute a request, optionally overriding the retry configuration for
    /// this call only.
    pub async fn request_with(
        &self,
        request: ApiRequest,
        retry: Option<&RetryConfig>,
    ) -> Result<Value> {
        let url = self.url(request.path());
        let retry = retry.unwrap_or(&self.http.config().retry);
        self.http.execute(&url, &request, &self.api_key, retry).await
    }

    /// Execute a request and deserialize the response payload.
    pub async fn request_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let value = self.request(request).await?;
        serde_json::from_value(value).map_err(Into::into)
    }
}
