//! HTTP request execution with retry and rate-limit awareness.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::ApiRequest;
use crate::retry::{backoff_delay, failure_context, parse_retry_after, rate_limit_wait, RetryConfig};

/// Low-level HTTP executor.
///
/// Issues one authenticated call per attempt, normalizes non-success
/// responses into structured errors, and wraps the whole thing in bounded
/// retry driven by [`RetryConfig`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a request with bounded retry.
    ///
    /// Runs `max_retries + 1` strictly sequential attempts. A retryable
    /// failure waits for the server-advised delay when one is present, else
    /// the computed backoff. A non-retryable failure, or exhaustion, raises a
    /// single consolidated error with attempt-count context; callers never
    /// observe intermediate attempts.
    pub async fn execute(
        &self,
        url: &str,
        request: &ApiRequest,
        api_key: &str,
        retry: &RetryConfig,
    ) -> Result<Value> {
        let mut attempt: u32 = 0;
        loop {
            match self.execute_once(url, request, api_key).await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if err.is_retryable() && attempt < retry.max_retries {
                        let delay =
                            rate_limit_wait(&err).unwrap_or_else(|| backoff_delay(attempt, retry));
                        warn!(
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    let context = failure_context(&err, attempt);
                    return Err(err.with_context(&context));
                }
            }
        }
    }

    /// Issue one authenticated call and return the parsed response body.
    async fn execute_once(&self, url: &str, request: &ApiRequest, api_key: &str) -> Result<Value> {
        let mut req = self
            .inner
            .request(request.method().to_reqwest(), url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json");

        let query = request.query_pairs();
        if !query.is_empty() {
            req = req.query(&query);
        }

        if let Some(body) = request.effective_body() {
            req = req.json(&body);
        }

        if self.config.enable_tracing {
            debug!(method = ?request.method(), url = %url, "sending request");
        }

        let response = req.send().await?;
        let status = response.status().as_u16();

        if !(200..300).contains(&status) {
            // Snapshot Retry-After before the body consumes the response.
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after);

            let body = response.text().await.unwrap_or_default();
            if self.config.enable_tracing {
                debug!(status, "non-success response");
            }
            return Err(status_error(status, retry_after, body));
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            // Many delete endpoints return nothing.
            return Ok(Value::Object(Map::new()));
        }

        serde_json::from_str(&body).map_err(Into::into)
    }
}

/// Normalize a non-success response into a structured error. The message
/// always carries the status code and raw body text.
fn status_error(
    status: u16,
    retry_after: Option<std::time::Duration>,
    body: String,
) -> Error {
    let message = format!("API request failed with status {status}: {body}");
    let kind = match status {
        429 => ErrorKind::RateLimited {
            retry_after,
            message,
        },
        401 => ErrorKind::Authentication(message),
        403 => ErrorKind::Authorization(message),
        404 => ErrorKind::NotFound(message),
        422 => ErrorKind::Validation(message),
        _ => ErrorKind::Http {
            status,
            retry_after,
            message,
        },
    };
    Error::new(kind)
}
