//! Fan-out search across resource types.

use futures::future::join_all;
use lumen_crm_client::{ApiRequest, Method};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::payload::Payload;
use crate::resources::{collection_key, endpoint_for};
use crate::types::SearchHit;

/// Per-type result cap used when the caller does not supply one.
pub const DEFAULT_SEARCH_LIMIT: u64 = 20;

impl super::CrmRestClient {
    /// Search several resource types concurrently and merge the results.
    ///
    /// One request is issued per resource type, all in parallel. A failing
    /// type contributes zero results and never aborts its siblings: this is
    /// a partial-result design. Hits are ordered by resource-type issue
    /// order, then by the CRM's native ordering within each type.
    #[instrument(skip(self))]
    pub async fn search_all(
        &self,
        query: &str,
        resource_types: &[&str],
        limit: Option<u64>,
    ) -> Result<Vec<SearchHit>> {
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);

        let shards = resource_types.iter().map(|resource| async move {
            let key = collection_key(resource);
            let request = ApiRequest::new(Method::Get, format!("{}/search", endpoint_for(resource)))
                .query("q", query)
                .query("limit", limit);

            match self.client.request(request).await {
                Ok(response) => Payload::decode(response, Some(&key))
                    .into_items()
                    .into_iter()
                    .map(|record| SearchHit {
                        resource_type: key.clone(),
                        record,
                    })
                    .collect(),
                Err(err) => {
                    debug!(resource = %key, error = %err, "search shard failed, skipping");
                    Vec::new()
                }
            }
        });

        // join_all preserves issue order regardless of completion order.
        let results = join_all(shards).await;
        Ok(results.into_iter().flatten().collect())
    }
}
