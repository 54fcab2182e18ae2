//! Error types for the content pipeline.
//!
//! This module defines [`LegendaError`], covering everything that can go
//! wrong between receiving a source descriptor and producing display HTML:
//! fetching, readability extraction, and PDF rendering.

use thiserror::Error;

/// Main error type for content pipeline operations.
///
/// # Example
///
/// ```rust
/// use legenda_core::{LegendaError, extract_readable};
///
/// match extract_readable("<html></html>", "https://example.com") {
///     Ok(readable) => println!("Title: {:?}", readable.title),
///     Err(LegendaError::NoContent) => println!("nothing readable here"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum LegendaError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues, and other
    /// HTTP-level problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success HTTP response.
    ///
    /// Returned when a fetched URL answers with a non-2xx status code.
    #[error("Unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to malformed markup
    /// or invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No substantial content block was found in the document.
    ///
    /// This typically happens on navigation pages, search results, or pages
    /// with very little text content. Callers are expected to surface this
    /// gracefully rather than treat it as a crash.
    #[error("No readable content could be extracted from the document")]
    NoContent,

    /// PDF rendering errors.
    ///
    /// Returned when PDF bytes cannot be decoded into text.
    #[error("Failed to render PDF: {0}")]
    PdfRender(String),
}

/// Result type alias for LegendaError.
pub type Result<T> = std::result::Result<T, LegendaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LegendaError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_http_status_error() {
        let err = LegendaError::HttpStatus { status: 503, url: "https://example.com".to_string() };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("example.com"));
    }

    #[test]
    fn test_timeout_error() {
        let err = LegendaError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }
}
