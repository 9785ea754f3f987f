//! Bounded-concurrency batch execution.

use futures::future::join_all;
use lumen_crm_client::{ApiRequest, Method};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::{Error, Result};
use crate::resources::endpoint_for;
use crate::types::{BatchItemResult, BatchOperation};

/// Records dispatched concurrently per batch.
pub const BATCH_SIZE: usize = 5;

impl super::CrmRestClient {
    /// Apply a write operation to a list of records.
    ///
    /// Records are processed in fixed-size batches: all records within a
    /// batch are dispatched concurrently, batches run sequentially. Each
    /// record succeeds or fails on its own; one result is returned per input
    /// record, in input order.
    ///
    /// Update and delete require each record to carry an `id`; update strips
    /// it from the outgoing body and uses it for the target path.
    #[instrument(skip(self, records), fields(operation = operation.as_str(), count = records.len()))]
    pub async fn batch_execute(
        &self,
        operation: BatchOperation,
        resource: &str,
        records: Vec<Map<String, Value>>,
    ) -> Result<Vec<BatchItemResult>> {
        let endpoint = endpoint_for(resource);
        let mut results = Vec::with_capacity(records.len());

        for batch in records.chunks(BATCH_SIZE) {
            let tasks = batch
                .iter()
                .map(|record| self.execute_item(operation, resource, &endpoint, record));
            // join_all collects positionally, preserving input order.
            results.extend(join_all(tasks).await);
        }

        Ok(results)
    }

    /// Run one record's operation, converting any failure into a result.
    async fn execute_item(
        &self,
        operation: BatchOperation,
        resource: &str,
        endpoint: &str,
        record: &Map<String, Value>,
    ) -> BatchItemResult {
        let request = match operation {
            BatchOperation::Create => {
                ApiRequest::new(Method::Post, endpoint).body(record.clone())
            }
            BatchOperation::Update => {
                let Some(id) = record_id(record) else {
                    return missing_id(operation, resource, record);
                };
                let mut body = record.clone();
                body.remove("id");
                ApiRequest::new(Method::Put, format!("{endpoint}/{id}")).body(body)
            }
            BatchOperation::Delete => {
                let Some(id) = record_id(record) else {
                    return missing_id(operation, resource, record);
                };
                ApiRequest::new(Method::Delete, format!("{endpoint}/{id}"))
            }
        };

        match self.client.request(request).await {
            Ok(data) => BatchItemResult::ok(data),
            Err(err) => BatchItemResult::failed(err.to_string(), Value::Object(record.clone())),
        }
    }
}

fn missing_id(
    operation: BatchOperation,
    resource: &str,
    record: &Map<String, Value>,
) -> BatchItemResult {
    let err = Error::MissingId {
        operation: operation.as_str(),
        resource: resource.to_string(),
    };
    BatchItemResult::failed(err.to_string(), Value::Object(record.clone()))
}

/// The record identifier as path text. Accepts string and numeric ids.
fn record_id(record: &Map<String, Value>) -> Option<String> {
    match record.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
