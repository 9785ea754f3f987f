//! # lumen-crm-rest
//!
//! Resource-level REST operations for the Lumen CRM API, built on top of
//! [`lumen-crm-client`](lumen_crm_client).
//!
//! ## Features
//!
//! - **CRUD**: create, get, update, delete, and list any CRM resource
//! - **Pagination**: [`CrmRestClient::fetch_all`] aggregates offset-paginated
//!   collections into a single list
//! - **Search**: [`CrmRestClient::search_all`] fans out one query across
//!   several resource types concurrently, merging partial results
//! - **Lookup**: [`CrmRestClient::find_by_field`] finds a record by exact
//!   field match, with a free-text fallback for unfilterable fields
//! - **Batch**: [`CrmRestClient::batch_execute`] applies a write operation to
//!   many records with bounded concurrency
//!
//! ## Example
//!
//! ```rust,ignore
//! use lumen_crm_rest::{BatchOperation, CrmRestClient};
//! use serde_json::{json, Map};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CrmRestClient::new("https://api.crm.example.com", "api-key")?;
//!
//!     let companies = client.list("company", Map::new()).await?;
//!     println!("{} companies", companies.len());
//!
//!     let hits = client.search_all("acme", &["companies", "people"], None).await?;
//!     for hit in hits {
//!         println!("{}: {}", hit.resource_type, hit.record["id"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod payload;
pub mod resources;
pub mod types;

pub use client::{CrmRestClient, BATCH_SIZE, DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_LIMIT};
pub use error::{Error, Result};
pub use payload::{page, Payload};
pub use resources::{collection_key, endpoint_for, record_endpoint};
pub use types::{BatchItemResult, BatchOperation, SearchHit};
