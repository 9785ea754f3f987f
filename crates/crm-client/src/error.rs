//! Error types for crm-client.

use std::time::Duration;

/// Result type alias for crm-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for crm-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Prefix the error message with additional context, preserving the kind.
    ///
    /// The retrying executor uses this to consolidate a failed call into a
    /// single error that still classifies correctly (status, rate limit, ...).
    pub fn with_context(mut self, context: &str) -> Self {
        self.kind = match self.kind {
            ErrorKind::Http {
                status,
                retry_after,
                message,
            } => ErrorKind::Http {
                status,
                retry_after,
                message: format!("{context}: {message}"),
            },
            ErrorKind::RateLimited {
                retry_after,
                message,
            } => ErrorKind::RateLimited {
                retry_after,
                message: format!("{context}: {message}"),
            },
            ErrorKind::Authentication(m) => ErrorKind::Authentication(format!("{context}: {m}")),
            ErrorKind::Authorization(m) => ErrorKind::Authorization(format!("{context}: {m}")),
            ErrorKind::NotFound(m) => ErrorKind::NotFound(format!("{context}: {m}")),
            ErrorKind::Validation(m) => ErrorKind::Validation(format!("{context}: {m}")),
            ErrorKind::Timeout(m) => ErrorKind::Timeout(format!("{context}: {m}")),
            ErrorKind::Connection(m) => ErrorKind::Connection(format!("{context}: {m}")),
            ErrorKind::Json(m) => ErrorKind::Json(format!("{context}: {m}")),
            ErrorKind::Config(m) => ErrorKind::Config(format!("{context}: {m}")),
            ErrorKind::Other(m) => ErrorKind::Other(format!("{context}: {m}")),
        };
        self
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimited { .. })
    }

    /// Returns the HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Http { status, .. } => Some(*status),
            ErrorKind::RateLimited { .. } => Some(429),
            ErrorKind::Authentication(_) => Some(401),
            ErrorKind::Authorization(_) => Some(403),
            ErrorKind::NotFound(_) => Some(404),
            ErrorKind::Validation(_) => Some(422),
            _ => None,
        }
    }

    /// Returns the server-advised wait, if the response carried one. Any
    /// status may advise a wait, not just 429.
    pub fn retry_after(&self) -> Option<Duration> {
        match &self.kind {
            ErrorKind::RateLimited { retry_after, .. }
            | ErrorKind::Http { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// HTTP request failed with a non-success status.
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        retry_after: Option<Duration>,
        message: String,
    },

    /// Rate limit exceeded (HTTP 429).
    #[error("Rate limited: {message}")]
    RateLimited {
        retry_after: Option<Duration>,
        message: String,
    },

    /// Authentication error (HTTP 401).
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authorization error (HTTP 403).
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Resource not found (HTTP 404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unprocessable input (HTTP 422).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Request timeout.
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::RateLimited { .. } => true,
            ErrorKind::Timeout(_) => true,
            ErrorKind::Connection(_) => true,
            ErrorKind::Http { status, .. } => is_retryable_status(*status),
            ErrorKind::Other(message) => is_transient_message(message),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable.
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 502 | 503 | 504)
}

/// Transient-failure indicators in network-level error messages.
const TRANSIENT_INDICATORS: &[&str] = &[
    "timeout",
    "timed out",
    "socket hang up",
    "network error",
    "econnrefused",
    "etimedout",
    "econnreset",
    "enotfound",
    "connection refused",
    "connection reset",
];

/// Check if an error message indicates a transient network failure.
pub(crate) fn is_transient_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    TRANSIENT_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout(err.to_string())
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                retry_after: None,
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_http_status_codes() {
        let retryable = [429, 502, 503, 504];
        for status in retryable {
            let err = Error::new(ErrorKind::Http {
                status,
                retry_after: None,
                message: "error".into(),
            });
            assert!(err.is_retryable(), "HTTP {status} should be retryable");
        }

        let non_retryable = [400, 401, 403, 404, 405, 409, 422, 500];
        for status in non_retryable {
            let err = Error::new(ErrorKind::Http {
                status,
                retry_after: None,
                message: "error".into(),
            });
            assert!(!err.is_retryable(), "HTTP {status} should NOT be retryable");
        }
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(Error::new(ErrorKind::RateLimited {
            retry_after: None,
            message: "slow down".into(),
        })
        .is_retryable());
        assert!(Error::new(ErrorKind::Timeout("deadline elapsed".into())).is_retryable());
        assert!(Error::new(ErrorKind::Connection("refused".into())).is_retryable());

        assert!(!Error::new(ErrorKind::NotFound("no such record".into())).is_retryable());
        assert!(!Error::new(ErrorKind::Authentication("bad key".into())).is_retryable());
        assert!(!Error::new(ErrorKind::Validation("missing name".into())).is_retryable());
        assert!(!Error::new(ErrorKind::Json("unexpected EOF".into())).is_retryable());
    }

    #[test]
    fn test_transient_message_classification() {
        for message in [
            "request timeout",
            "socket hang up",
            "network error while reading body",
            "ECONNREFUSED 127.0.0.1:443",
            "ETIMEDOUT",
            "read ECONNRESET",
            "getaddrinfo ENOTFOUND crm.example.com",
        ] {
            let err = Error::new(ErrorKind::Other(message.to_string()));
            assert!(err.is_retryable(), "{message:?} should be retryable");
        }

        let err = Error::new(ErrorKind::Other("invalid argument".into()));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_retry_after_accessor() {
        let err = Error::new(ErrorKind::RateLimited {
            retry_after: Some(Duration::from_secs(30)),
            message: "429".into(),
        });
        assert!(err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(30)));
        assert_eq!(err.status(), Some(429));

        // Any status may advise a wait, not just 429.
        let err = Error::new(ErrorKind::Http {
            status: 503,
            retry_after: Some(Duration::from_secs(5)),
            message: "down".into(),
        });
        assert!(!err.is_rate_limited());
        assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));

        let err = Error::new(ErrorKind::Timeout("elapsed".into()));
        assert!(!err.is_rate_limited());
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_with_context_preserves_kind() {
        let err = Error::new(ErrorKind::Http {
            status: 503,
            retry_after: Some(Duration::from_secs(7)),
            message: "upstream unavailable".into(),
        })
        .with_context("Service temporarily unavailable");

        assert_eq!(err.status(), Some(503));
        assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
        assert!(err
            .to_string()
            .contains("Service temporarily unavailable: upstream unavailable"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }
}
