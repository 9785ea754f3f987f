//! Single-record CRUD and collection listing.

use lumen_crm_client::{ApiRequest, Method};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::error::Result;
use crate::resources::{endpoint_for, record_endpoint};

impl super::CrmRestClient {
    /// Create a record.
    #[instrument(skip(self, record))]
    pub async fn create(&self, resource: &str, record: Map<String, Value>) -> Result<Value> {
        let request = ApiRequest::new(Method::Post, endpoint_for(resource)).body(record);
        Ok(self.client.request(request).await?)
    }

    /// Fetch a record by id.
    #[instrument(skip(self))]
    pub async fn get(&self, resource: &str, id: &str) -> Result<Value> {
        let request = ApiRequest::new(Method::Get, record_endpoint(resource, id));
        Ok(self.client.request(request).await?)
    }

    /// Replace a record's fields.
    #[instrument(skip(self, record))]
    pub async fn update(
        &self,
        resource: &str,
        id: &str,
        record: Map<String, Value>,
    ) -> Result<Value> {
        let request = ApiRequest::new(Method::Put, record_endpoint(resource, id)).body(record);
        Ok(self.client.request(request).await?)
    }

    /// Delete a record by id.
    #[instrument(skip(self))]
    pub async fn delete(&self, resource: &str, id: &str) -> Result<Value> {
        let request = ApiRequest::new(Method::Delete, record_endpoint(resource, id));
        Ok(self.client.request(request).await?)
    }

    /// List every record of a resource, aggregated across pages.
    ///
    /// `query` carries server-side filters and sorting; pagination parameters
    /// are managed internally. See [`fetch_all`](Self::fetch_all) for the
    /// pagination contract.
    #[instrument(skip(self, query))]
    pub async fn list(&self, resource: &str, query: Map<String, Value>) -> Result<Vec<Value>> {
        self.fetch_all(Method::Get, &endpoint_for(resource), None, query, None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::CrmRestClient;
    use serde_json::{json, Map, Value};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[tokio::test]
    async fn test_create_posts_to_collection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/rest/companies"))
            .and(body_json(json!({"name": "Acme"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "Acme"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = CrmRestClient::new(server.uri(), "key").unwrap();
        let created = client
            .create("company", record(json!({"name": "Acme"})))
            .await
            .unwrap();

        assert_eq!(created["id"], json!(1));
    }

    #[tokio::test]
    async fn test_get_targets_record_path() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/people/p-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = CrmRestClient::new(server.uri(), "key").unwrap();
        let person = client.get("person", "p-1").await.unwrap();

        assert_eq!(person["id"], json!("p-1"));
    }

    #[tokio::test]
    async fn test_update_puts_body_to_record_path() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/rest/companies/7"))
            .and(body_json(json!({"name": "Acme Ltd"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
            .expect(1)
            .mount(&server)
            .await;

        let client = CrmRestClient::new(server.uri(), "key").unwrap();
        let updated = client
            .update("company", "7", record(json!({"name": "Acme Ltd"})))
            .await
            .unwrap();

        assert_eq!(updated["id"], json!(7));
    }

    #[tokio::test]
    async fn test_delete_returns_empty_object_on_bodyless_success() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/rest/tasks/t-3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = CrmRestClient::new(server.uri(), "key").unwrap();
        let deleted = client.delete("task", "t-3").await.unwrap();

        assert_eq!(deleted, json!({}));
    }

    #[tokio::test]
    async fn test_list_forwards_filters_and_aggregates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/leads"))
            .and(query_param("status", "open"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"id": 1}, {"id": 2}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CrmRestClient::new(server.uri(), "key").unwrap();
        let mut query = Map::new();
        query.insert("status".to_string(), json!("open"));
        let leads = client.list("lead", query).await.unwrap();

        assert_eq!(leads.len(), 2);
    }

    #[tokio::test]
    async fn test_not_found_propagates_as_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/rest/companies/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no such record"))
            .mount(&server)
            .await;

        let client = CrmRestClient::new(server.uri(), "key").unwrap();
        let err = client.get("company", "missing").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
    }
}
