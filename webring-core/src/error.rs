//! Error types for the webring service.
//!
//! Navigation and request errors are surfaced to HTTP callers; data source
//! errors are absorbed by the ring cache and only ever show up in logs.

use thiserror::Error;

/// Result type alias using `WebringError`.
pub type Result<T> = std::result::Result<T, WebringError>;

/// Main error type for all webring operations.
#[derive(Debug, Error)]
pub enum WebringError {
    // ═══════════════════════════════════════════════════════════════════════════
    // NAVIGATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Navigation was requested against an empty ring.
    #[error("No webring URLs available")]
    NoUrlsAvailable,

    /// A required query parameter was absent or empty.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // DATA SOURCE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The data source answered, but not with usable rows.
    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    /// The data source did not answer in time.
    #[error("Data source timed out after {seconds}s")]
    FetchTimeout { seconds: u64 },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION & STORAGE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Malformed range selector.
    #[error("Invalid range selector '{0}'")]
    InvalidRange(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Internal invariant violation (should never happen).
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl WebringError {
    /// Returns true if the error came from talking to the data source.
    ///
    /// These are the errors the ring cache swallows in favour of stale data.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            WebringError::DataSourceUnavailable(_)
                | WebringError::FetchTimeout { .. }
                | WebringError::HttpError(_)
                | WebringError::JsonError(_)
        )
    }

    /// Returns true if the error is the caller's fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WebringError::NoUrlsAvailable | WebringError::MissingParameter(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            WebringError::NoUrlsAvailable.to_string(),
            "No webring URLs available"
        );
        assert_eq!(
            WebringError::MissingParameter("current".into()).to_string(),
            "Missing required parameter: current"
        );
        assert!(WebringError::FetchTimeout { seconds: 10 }
            .to_string()
            .contains("10s"));
    }

    #[test]
    fn test_error_classification() {
        assert!(WebringError::HttpError("refused".into()).is_upstream());
        assert!(WebringError::FetchTimeout { seconds: 1 }.is_upstream());
        assert!(!WebringError::NoUrlsAvailable.is_upstream());

        assert!(WebringError::NoUrlsAvailable.is_client_error());
        assert!(!WebringError::ConfigError("x".into()).is_client_error());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(WebringError::from);
        assert!(matches!(result, Err(WebringError::JsonError(_))));
    }
}
