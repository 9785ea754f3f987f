//! Lumen CRM REST client.
//!
//! Wraps [`CrmClient`] from `lumen-crm-client` and provides resource-level
//! operations: single-record CRUD, offset pagination, fan-out search,
//! field-match lookup, and bounded-concurrency batch execution.

use lumen_crm_client::{ClientConfig, CrmClient};

use crate::error::Result;

mod batch;
mod crud;
mod lookup;
mod query;
mod search;

pub use batch::BATCH_SIZE;
pub use query::DEFAULT_PAGE_SIZE;
pub use search::DEFAULT_SEARCH_LIMIT;

/// Resource-level CRM REST client.
///
/// # Example
///
/// ```rust,ignore
/// use lumen_crm_rest::CrmRestClient;
/// use serde_json::json;
///
/// let client = CrmRestClient::new("https://api.crm.example.com", "api-key")?;
///
/// // Full collection, aggregated across pages
/// let companies = client.list("company", Default::default()).await?;
///
/// // Search companies and people at once
/// let hits = client.search_all("acme", &["companies", "people"], None).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CrmRestClient {
    client: CrmClient,
}

impl CrmRestClient {
    /// Create a new REST client with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = CrmClient::new(base_url, api_key)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = CrmClient::with_config(base_url, api_key, config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing CrmClient.
    pub fn from_client(client: CrmClient) -> Self {
        Self { client }
    }

    /// Get the underlying CrmClient.
    pub fn inner(&self) -> &CrmClient {
        &self.client
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}
