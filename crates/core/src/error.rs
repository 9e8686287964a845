//! Error types for seoscope operations.
//!
//! This module defines the main error type [`SeoscopeError`] covering CMS
//! fetching, payload decoding, and oracle calls. Only the fetch-side
//! variants are fatal to a request: oracle variants are caught inside the
//! pipeline and degrade a single field of the result instead.

use thiserror::Error;

/// Main error type for analysis operations.
///
/// # Example
///
/// ```rust
/// use seoscope_core::{SeoscopeError, Result};
///
/// fn check_body(html: &str) -> Result<()> {
///     if html.len() > 1_000_000 {
///         return Err(SeoscopeError::MalformedDocument("body too large".into()));
///     }
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum SeoscopeError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues, and
    /// non-success status codes.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The CMS responded, but the payload does not match any known
    /// document shape.
    #[error("Malformed CMS document: {0}")]
    MalformedDocument(String),

    /// JSON decoding errors.
    #[error("Failed to decode JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The oracle call itself failed (network, auth, provider error).
    ///
    /// Never fatal to a request: the pipeline substitutes a default value
    /// for the affected field.
    #[error("Oracle request failed: {0}")]
    OracleError(String),

    /// The oracle answered, but its output could not be parsed into the
    /// expected structure.
    #[error("Oracle returned unparseable output: {0}")]
    OracleParseError(String),
}

/// Result type alias for SeoscopeError.
pub type Result<T> = std::result::Result<T, SeoscopeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SeoscopeError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = SeoscopeError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_malformed_document_error() {
        let err = SeoscopeError::MalformedDocument("missing title".to_string());
        assert!(err.to_string().contains("missing title"));
    }

    #[test]
    fn test_oracle_errors_are_distinct() {
        let request = SeoscopeError::OracleError("503".to_string());
        let parse = SeoscopeError::OracleParseError("not json".to_string());
        assert_ne!(request.to_string(), parse.to_string());
    }
}
