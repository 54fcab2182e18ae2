//! Content fetching over HTTP.
//!
//! Articles arrive either as remote URLs or as blob references that the
//! server resolves to a public retrieval URL; both end up here. The text
//! variant feeds the reading-time estimator, the bytes variant feeds the
//! PDF renderer.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::dom::Document;
use crate::{LegendaError, Result};

/// HTTP client configuration for fetching article sources.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (compatible; Legenda/0.1; +https://github.com/legenda-app/legenda)"
                .to_string(),
        }
    }
}

async fn get_response(url: &str, config: &FetchConfig) -> Result<reqwest::Response> {
    let parsed_url = Url::parse(url).map_err(|e| LegendaError::InvalidUrl(e.to_string()))?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(LegendaError::HttpError)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/pdf,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                LegendaError::Timeout { timeout: config.timeout }
            } else {
                LegendaError::HttpError(e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(LegendaError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    Ok(response)
}

/// Fetches the raw response body of a URL as text.
///
/// Performs an HTTP GET, follows redirects, and enforces the configured
/// timeout. Non-2xx responses are an error.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let response = get_response(url, config).await?;
    let content = response.text().await?;

    Ok(content)
}

/// Fetches the raw response body of a URL as bytes.
///
/// Used for PDF sources, where decoding the body as UTF-8 would corrupt it.
pub async fn fetch_bytes(url: &str, config: &FetchConfig) -> Result<Vec<u8>> {
    let response = get_response(url, config).await?;
    let bytes = response.bytes().await?;

    Ok(bytes.to_vec())
}

/// Extracts the tag-stripped text content of an HTML document's body.
///
/// This is what the reading-time estimator runs over for URL sources.
pub fn body_text(html: &str) -> String {
    Document::parse(html).body_text()
}
