//! Field-match lookup, used by upsert logic to decide create-vs-update.

use lumen_crm_client::{ApiRequest, Method};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::payload::Payload;
use crate::resources::{collection_key, endpoint_for};

impl super::CrmRestClient {
    /// Find the first record whose `field` equals `value`, or `None`.
    ///
    /// The primary path is a structured equality filter capped to one result.
    /// If the server rejects that request (some fields are not filterable),
    /// a free-text search is scanned client-side for an exact match instead.
    /// Finding nothing is a normal outcome, not an error.
    #[instrument(skip(self, value))]
    pub async fn find_by_field(
        &self,
        resource: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Value>> {
        let endpoint = endpoint_for(resource);
        let key = collection_key(resource);
        let literal = value_text(value);

        // Filter dialect is dictated by the CRM: `field[operator]:value`.
        let request = ApiRequest::new(Method::Get, &endpoint)
            .query("filter", format!("{field}[eq]:{literal}"))
            .query("limit", 1);

        let fallback = match self.client.request(request).await {
            Ok(response) => {
                let mut items = Payload::decode(response, Some(&key)).into_items();
                if items.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(items.swap_remove(0)));
            }
            Err(err) => {
                debug!(resource = %key, %field, error = %err, "filter lookup rejected, falling back to search");
                ApiRequest::new(Method::Get, format!("{endpoint}/search"))
                    .query("q", literal)
                    .query("limit", 10)
            }
        };

        match self.client.request(fallback).await {
            Ok(response) => Ok(Payload::decode(response, Some(&key))
                .into_items()
                .into_iter()
                .find(|item| field_matches(item.get(field), value))),
            Err(err) => {
                debug!(resource = %key, %field, error = %err, "fallback search failed");
                Ok(None)
            }
        }
    }
}

/// Exact match on a field: case-insensitive for textual values,
/// string-coercion equality otherwise.
fn field_matches(candidate: Option<&Value>, target: &Value) -> bool {
    let Some(candidate) = candidate else {
        return false;
    };
    match (candidate, target) {
        (Value::String(a), Value::String(b)) => a.to_lowercase() == b.to_lowercase(),
        (a, b) => value_text(a) == value_text(b),
    }
}

/// A value as query text: strings verbatim, other scalars via their JSON
/// representation.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
