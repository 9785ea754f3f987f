//! # lumen-crm-api
//!
//! A Lumen CRM API client library for Rust.
//!
//! This library provides access to the Lumen CRM's REST resources with
//! built-in authentication, retry logic, and error handling.
//!
//! ## Security
//!
//! - API keys are redacted in Debug output
//! - Tracing/logging skips credential parameters
//!
//! ## Crates
//!
//! - **lumen-crm-client** - Core HTTP client infrastructure with retry,
//!   compression, rate-limit handling
//! - **lumen-crm-rest** - Resource layer: CRUD, pagination, search, lookup,
//!   batch operations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lumen_crm_api::CrmRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CrmRestClient::new(
//!         "https://api.crm.example.com",
//!         std::env::var("LUMEN_API_KEY")?,
//!     )?;
//!
//!     // Every company, aggregated across pages
//!     let companies = client.list("company", Default::default()).await?;
//!
//!     for company in companies {
//!         println!("{}", company["name"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export the member crates for convenient access
#[cfg(feature = "client")]
pub use lumen_crm_client as client;
#[cfg(feature = "rest")]
pub use lumen_crm_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use lumen_crm_client::{ApiRequest, ClientConfig, CrmClient, Method, RetryConfig};
#[cfg(feature = "rest")]
pub use lumen_crm_rest::{BatchOperation, CrmRestClient, SearchHit};
