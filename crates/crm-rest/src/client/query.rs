//! Offset pagination aggregation.

use lumen_crm_client::{ApiRequest, Method};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::payload;

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: u64 = 200;

impl super::CrmRestClient {
    /// Fetch every item of a paginated endpoint.
    ///
    /// Drives the endpoint with increasing offsets until a short page signals
    /// the end, accumulating items in page order. The caller's query must not
    /// contain `offset` or `limit`; they are managed here.
    ///
    /// A page shorter than the requested limit is treated as the last page.
    /// This is a heuristic, not a cursor guarantee: a transient short page
    /// would end the run early.
    #[instrument(skip(self, body, query))]
    pub async fn fetch_all(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Map<String, Value>>,
        query: Map<String, Value>,
        limit: Option<u64>,
    ) -> Result<Vec<Value>> {
        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let mut offset: u64 = 0;
        let mut all = Vec::new();

        loop {
            let mut page_query = query.clone();
            page_query.insert("offset".to_string(), offset.into());
            page_query.insert("limit".to_string(), limit.into());

            let mut request = ApiRequest::new(method, endpoint).query_map(page_query);
            if let Some(ref body) = body {
                request = request.body(body.clone());
            }

            let response = self.client.request(request).await?;
            let (items, continued) = payload::page(response);
            let count = items.len() as u64;
            all.extend(items);

            debug!(offset, count, total = all.len(), "fetched page");

            if !continued || count < limit {
                break;
            }
            offset += limit;
        }

        Ok(all)
    }
}
