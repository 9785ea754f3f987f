//! Retry policy: exponential backoff with jitter and Retry-After support.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::error::{Error, ErrorKind};

/// Configuration for retry behavior.
///
/// A default configuration exists on every client; callers may override it
/// per call. The configuration is immutable for the duration of one call.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retries after the initial attempt.
    pub max_retries: u32,
    /// Base delay for exponential backoff.
    pub base_delay: Duration,
    /// Cap on the computed backoff delay.
    pub max_delay: Duration,
    /// Jitter factor applied to the backoff delay (0.25 = +/-25%).
    pub jitter: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(30),
            jitter: 0.25,
        }
    }
}

impl RetryConfig {
    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the cap on the computed backoff delay.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the jitter factor.
    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter;
        self
    }

    /// Disable retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }
}

/// Compute the backoff delay for a given attempt number (0-indexed).
///
/// `base_delay * 2^attempt`, capped at `max_delay`, randomized by the
/// configured jitter factor and rounded to whole milliseconds.
pub fn backoff_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let exponential = config.base_delay.as_millis() as f64 * 2f64.powi(attempt as i32);
    let capped = exponential.min(config.max_delay.as_millis() as f64);

    let mut rng = rand::rng();
    let factor = 1.0 + rng.random_range(-config.jitter..=config.jitter);

    Duration::from_millis((capped * factor).round().max(0.0) as u64)
}

/// Server-advised wait extracted from an error, if the response carried a
/// `Retry-After` header. Rate limits and gateway errors alike may advise one.
///
/// When present this takes precedence over the computed backoff.
pub fn rate_limit_wait(error: &Error) -> Option<Duration> {
    error.retry_after()
}

/// Parse a `Retry-After` header value.
///
/// Accepts either an integer count of seconds or an HTTP date; a date in the
/// past clamps to zero.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let value = value.trim();

    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let date = DateTime::parse_from_rfc2822(value).ok()?;
    let until = date.with_timezone(&Utc) - Utc::now();
    Some(until.to_std().unwrap_or(Duration::ZERO))
}

/// Human-readable context for a failed call.
///
/// `attempt` is the 0-indexed attempt on which the executor gave up; the
/// attempt count is appended only when at least one retry occurred.
pub fn failure_context(error: &Error, attempt: u32) -> String {
    let phrase = match &error.kind {
        ErrorKind::RateLimited { .. } => Some("Rate limit exceeded"),
        ErrorKind::Http { status: 503, .. } => Some("Service temporarily unavailable"),
        ErrorKind::Http {
            status: 502 | 504, ..
        } => Some("Server gateway error"),
        ErrorKind::Connection(message)
            if message.to_lowercase().contains("refused")
                || message.to_lowercase().contains("econnrefused") =>
        {
            Some("Connection refused")
        }
        _ => None,
    };

    let mut context = phrase.unwrap_or("Request failed").to_string();
    if attempt > 0 {
        context.push_str(&format!(". Failed after {} attempt(s)", attempt + 1));
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay, Duration::from_millis(1000));
        assert_eq!(config.max_delay, Duration::from_secs(30));
        assert!((config.jitter - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_retry() {
        let config = RetryConfig::no_retry();
        assert_eq!(config.max_retries, 0);
    }

    #[test]
    fn test_backoff_within_jitter_bounds() {
        let config = RetryConfig::default();

        for attempt in 0..4u32 {
            let expected = 1000.0 * 2f64.powi(attempt as i32);
            let delay = backoff_delay(attempt, &config).as_millis() as f64;
            assert!(
                delay >= expected * 0.75 - 1.0 && delay <= expected * 1.25 + 1.0,
                "attempt {attempt}: {delay}ms outside +/-25% of {expected}ms"
            );
        }
    }

    #[test]
    fn test_backoff_capped_at_max_delay() {
        let config = RetryConfig::default().with_max_delay(Duration::from_secs(4));

        // 2^10 seconds uncapped; must stay within jitter of the 4s cap.
        let delay = backoff_delay(10, &config);
        assert!(delay <= Duration::from_millis(5000));
        assert!(delay >= Duration::from_millis(3000));
    }

    #[test]
    fn test_backoff_without_jitter_is_exact() {
        let config = RetryConfig::default().with_jitter(0.0);

        assert_eq!(backoff_delay(0, &config), Duration::from_millis(1000));
        assert_eq!(backoff_delay(1, &config), Duration::from_millis(2000));
        assert_eq!(backoff_delay(2, &config), Duration::from_millis(4000));
        assert_eq!(backoff_delay(3, &config), Duration::from_millis(8000));
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        assert_eq!(parse_retry_after("30"), Some(Duration::from_secs(30)));
        assert_eq!(parse_retry_after(" 5 "), Some(Duration::from_secs(5)));
        assert_eq!(parse_retry_after("0"), Some(Duration::ZERO));
    }

    #[test]
    fn test_parse_retry_after_http_date() {
        // A date far in the future yields a positive wait.
        let future = (Utc::now() + chrono::Duration::seconds(120)).to_rfc2822();
        let wait = parse_retry_after(&future).unwrap();
        assert!(wait > Duration::from_secs(110) && wait <= Duration::from_secs(121));

        // A date in the past clamps to zero.
        let past = (Utc::now() - chrono::Duration::seconds(120)).to_rfc2822();
        assert_eq!(parse_retry_after(&past), Some(Duration::ZERO));
    }

    #[test]
    fn test_parse_retry_after_garbage() {
        assert_eq!(parse_retry_after("soon"), None);
        assert_eq!(parse_retry_after(""), None);
    }

    #[test]
    fn test_failure_context_phrases() {
        let rate_limited = Error::new(ErrorKind::RateLimited {
            retry_after: None,
            message: "429".into(),
        });
        assert_eq!(failure_context(&rate_limited, 0), "Rate limit exceeded");

        let unavailable = Error::new(ErrorKind::Http {
            status: 503,
            retry_after: None,
            message: "down".into(),
        });
        assert_eq!(
            failure_context(&unavailable, 0),
            "Service temporarily unavailable"
        );

        for status in [502, 504] {
            let gateway = Error::new(ErrorKind::Http {
                status,
                retry_after: None,
                message: "bad gateway".into(),
            });
            assert_eq!(failure_context(&gateway, 0), "Server gateway error");
        }

        let refused = Error::new(ErrorKind::Connection(
            "ECONNREFUSED 10.0.0.1:443".to_string(),
        ));
        assert_eq!(failure_context(&refused, 0), "Connection refused");
    }

    #[test]
    fn test_failure_context_attempt_count() {
        let err = Error::new(ErrorKind::Http {
            status: 503,
            retry_after: None,
            message: "down".into(),
        });

        // No retries: no attempt count.
        assert!(!failure_context(&err, 0).contains("Failed after"));

        // Gave up on the third attempt (two retries).
        assert_eq!(
            failure_context(&err, 2),
            "Service temporarily unavailable. Failed after 3 attempt(s)"
        );
    }
}
