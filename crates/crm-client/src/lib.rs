//! # lumen-crm-client
//!
//! Core HTTP client infrastructure for the Lumen CRM REST API.
//!
//! This crate provides the foundational client with:
//! - Automatic retry with exponential backoff and jitter
//! - Rate-limit detection and `Retry-After` handling
//! - Structured error normalization of non-success responses
//! - Per-call retry overrides
//! - Request/response tracing
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Resource Layer                         │
//! │  (lumen-crm-rest: pagination, search, lookup, batch)     │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                     CrmClient                            │
//! │  - Holds credentials (base URL + API key)                │
//! │  - Builds full URLs, dispatches ApiRequest descriptors   │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                     HttpClient                           │
//! │  - One authenticated call per attempt                    │
//! │  - Bounded retry with backoff and Retry-After            │
//! │  - Error normalization                                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use lumen_crm_client::{ApiRequest, CrmClient, Method};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lumen_crm_client::Error> {
//!     let client = CrmClient::new("https://api.crm.example.com", "api-key")?;
//!
//!     let companies = client
//!         .request(ApiRequest::new(Method::Get, "/rest/companies").query("limit", 10))
//!         .await?;
//!
//!     println!("{companies}");
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod crm_client;
mod error;
mod request;
mod retry;

pub use client::HttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use crm_client::CrmClient;
pub use error::{Error, ErrorKind, Result};
pub use request::{ApiRequest, Method};
pub use retry::{backoff_delay, failure_context, parse_retry_after, rate_limit_wait, RetryConfig};

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("lumen-crm-api/", env!("CARGO_PKG_VERSION"));
