//! Source resolution and content retrieval.
//!
//! An article `source` is either an absolute URL or a blob reference into
//! the object store. [`ContentFetcher`] hides that distinction from the
//! lifecycle controller: blob references are resolved to their public
//! retrieval URL first, then fetched over HTTP like any remote source.

use std::sync::Arc;

use async_trait::async_trait;

use legenda_core::fetch::{FetchConfig, body_text, fetch_bytes, fetch_url};

use crate::error::Result;
use crate::store::BlobStore;

/// Retrieved content together with the URL it actually came from.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub text: String,
    pub resolved_url: String,
}

/// Retrieves article content for a source descriptor.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Tag-stripped plain text, for reading-time estimation.
    ///
    /// URL sources have their HTML body stripped; blob sources come back as
    /// their raw text body.
    async fn fetch_text(&self, source: &str) -> Result<Fetched>;

    /// The raw response body, for readability extraction.
    async fn fetch_html(&self, source: &str) -> Result<Fetched>;

    /// The raw response bytes, for PDF rendering.
    async fn fetch_raw(&self, source: &str) -> Result<Vec<u8>>;

    /// The URL a source descriptor resolves to.
    fn resolve_url(&self, source: &str) -> String;
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// [`ContentFetcher`] backed by the core HTTP fetcher and the blob store.
pub struct HttpFetcher {
    blobs: Arc<dyn BlobStore>,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(blobs: Arc<dyn BlobStore>, config: FetchConfig) -> Self {
        Self { blobs, config }
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch_text(&self, source: &str) -> Result<Fetched> {
        let resolved_url = self.resolve_url(source);
        let body = fetch_url(&resolved_url, &self.config).await?;

        let text = if is_remote(source) { body_text(&body) } else { body };
        Ok(Fetched { text, resolved_url })
    }

    async fn fetch_html(&self, source: &str) -> Result<Fetched> {
        let resolved_url = self.resolve_url(source);
        let text = fetch_url(&resolved_url, &self.config).await?;

        Ok(Fetched { text, resolved_url })
    }

    async fn fetch_raw(&self, source: &str) -> Result<Vec<u8>> {
        let resolved_url = self.resolve_url(source);
        Ok(fetch_bytes(&resolved_url, &self.config).await?)
    }

    fn resolve_url(&self, source: &str) -> String {
        if is_remote(source) {
            source.to_string()
        } else {
            self.blobs.public_url(source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.com/a"));
        assert!(is_remote("http://example.com/a"));
        assert!(!is_remote("uploads/paper.pdf"));
        assert!(!is_remote("ftp://example.com/a"));
    }
}
