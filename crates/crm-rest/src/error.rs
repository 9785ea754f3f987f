//! Error types for crm-rest.

/// Result type alias for crm-rest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for crm-rest operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error propagated from the core HTTP client.
    #[error(transparent)]
    Client(#[from] lumen_crm_client::Error),

    /// A record was missing the identifier an operation requires.
    #[error("record is missing an 'id' field for {operation} on {resource}")]
    MissingId {
        operation: &'static str,
        resource: String,
    },
}

impl Error {
    /// Returns the HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Client(err) => err.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_passthrough() {
        let inner = lumen_crm_client::Error::new(lumen_crm_client::ErrorKind::NotFound(
            "no such record".into(),
        ));
        let err: Error = inner.into();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("no such record"));
    }

    #[test]
    fn test_missing_id_display() {
        let err = Error::MissingId {
            operation: "update",
            resource: "company".into(),
        };
        assert!(err.to_string().contains("update"));
        assert!(err.to_string().contains("company"));
        assert_eq!(err.status(), None);
    }
}
