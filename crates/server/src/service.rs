//! The article lifecycle controller.
//!
//! Orchestrates the store, the content fetcher, and the pipeline into the
//! operations the REST surface exposes. Every operation re-reads the
//! authoritative record from the store at the start and writes back at the
//! end; there is no in-process article cache and no locking. Two concurrent
//! writes to the same article race, and the last full-record write wins.
//! That is an accepted limitation, exercised by the integration tests
//! rather than papered over here.

use std::cmp::Ordering;
use std::sync::Arc;

use time::OffsetDateTime;

use legenda_core::paginate::Page;
use legenda_core::readability::Readable;
use legenda_core::{estimate_reading_time, extract_readable, generate_id, paginate, render_pdf_to_html, summarize};

use crate::article::{Article, ArticleUpdate, NewArticle, dedupe_tags};
use crate::error::{ApiError, Result};
use crate::fetcher::ContentFetcher;
use crate::store::{ArticleStore, BlobStore};

/// Default number of sentences for an on-demand summary.
const DEFAULT_SUMMARY_SENTENCES: usize = 10;

/// Default pagination window for the markdown endpoint.
pub const DEFAULT_PAGE_SIZE: usize = 10_000;

/// Listing parameters for `GET /api/articles`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Field to sort by; defaults to id, newest first.
    pub sort: Option<String>,
    /// When true, archived articles are excluded.
    pub exclude_archived: bool,
    /// Flips whichever comparator `sort` selected.
    pub reverse: bool,
}

pub struct ArticleService {
    store: Arc<dyn ArticleStore>,
    blobs: Arc<dyn BlobStore>,
    fetcher: Arc<dyn ContentFetcher>,
}

impl ArticleService {
    pub fn new(store: Arc<dyn ArticleStore>, blobs: Arc<dyn BlobStore>, fetcher: Arc<dyn ContentFetcher>) -> Self {
        Self { store, blobs, fetcher }
    }

    /// Lists articles with optional sorting and archived filtering.
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<Article>> {
        let mut articles = self.store.list_all().await?;

        articles.sort_by(|a, b| {
            let ordering = match options.sort.as_deref() {
                None | Some("id") => compare_ids(&b.id, &a.id),
                Some(field) => field_value(b, field).cmp(&field_value(a, field)),
            };
            if options.reverse { ordering.reverse() } else { ordering }
        });

        if options.exclude_archived {
            articles.retain(|article| !article.archived);
        }

        Ok(articles)
    }

    /// Loads one article.
    pub async fn get(&self, id: &str) -> Result<Article> {
        self.store.get(id).await?.ok_or(ApiError::NotFound)
    }

    /// Creates an article: id and creation date are assigned here, the
    /// source is fetched, and the reading-time record is computed
    /// synchronously. The markdown and summary caches stay empty until
    /// first requested.
    pub async fn create(&self, payload: NewArticle) -> Result<Article> {
        let fetched = self.fetcher.fetch_text(&payload.source).await?;
        let read = estimate_reading_time(&fetched.text);

        let article = Article {
            id: generate_id(),
            title: payload.title,
            source: payload.source,
            file_type: payload.file_type,
            status: payload.status,
            archived: payload.archived,
            tags: dedupe_tags(payload.tags),
            note: payload.note,
            date: OffsetDateTime::now_utc(),
            read: Some(read),
            markdown: None,
            summary: None,
        };

        self.store.upsert(&article).await?;
        Ok(article)
    }

    /// Replaces an article wholesale under its existing id.
    ///
    /// A stale `markdown`/`summary` cache survives even when `source`
    /// changes; the caches are keyed by id, not by content, and have never
    /// been invalidated here.
    pub async fn replace(&self, id: &str, update: ArticleUpdate) -> Result<Article> {
        if self.store.get(id).await?.is_none() {
            return Err(ApiError::NotFound);
        }

        let article = update.into_article(id.to_string());
        self.store.upsert(&article).await?;
        Ok(article)
    }

    /// Soft-deletes an article: the record is copied into the trash
    /// collection, then removed from the primary collection.
    ///
    /// Deleting an id that does not exist is a no-op; the endpoint answers
    /// 204 either way.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let Some(article) = self.store.get(id).await? else {
            return Ok(());
        };

        self.store.insert_trash(&article).await?;
        self.store.delete_by_id(id).await?;
        Ok(())
    }

    /// Flattens every article's tag set into one deduplicated collection,
    /// first-seen order across the store's iteration order.
    pub async fn tags(&self) -> Result<Vec<String>> {
        let articles = self.store.list_all().await?;
        if articles.is_empty() {
            return Err(ApiError::NoArticles);
        }

        Ok(dedupe_tags(articles.into_iter().flat_map(|article| article.tags).collect()))
    }

    /// Serves one page of the article's extracted HTML.
    ///
    /// Computation order: the persisted cache wins outright; otherwise PDF
    /// sources go through the PDF renderer and everything else through
    /// readability extraction. The result is written back to the store
    /// before the page is returned, so extraction happens at most once per
    /// article.
    pub async fn markdown_page(&self, id: &str, page: usize, page_size: usize) -> Result<Page> {
        let mut article = self.get(id).await?;

        let html = match article.markdown {
            Some(ref html) => html.clone(),
            None => {
                let html = self.extract_markdown(&article).await?;
                article.markdown = Some(html.clone());
                self.store.upsert(&article).await?;
                html
            }
        };

        Ok(paginate(&html, page, page_size))
    }

    async fn extract_markdown(&self, article: &Article) -> Result<String> {
        if article.is_pdf() {
            let bytes = self.fetcher.fetch_raw(&article.source).await?;
            Ok(render_pdf_to_html(&bytes)?)
        } else {
            let fetched = self.fetcher.fetch_html(&article.source).await?;
            Ok(extract_readable(&fetched.text, &fetched.resolved_url)?.content)
        }
    }

    /// Runs readability extraction against the article's source on demand.
    pub async fn readability(&self, id: &str) -> Result<Readable> {
        let article = self.get(id).await?;
        let fetched = self.fetcher.fetch_html(&article.source).await?;
        Ok(extract_readable(&fetched.text, &fetched.resolved_url)?)
    }

    /// Returns the article's summary sentences, computing and persisting
    /// them on first access.
    ///
    /// A missing or zero sentence count falls back to the default; an empty
    /// summary must never reach the write-once cache.
    pub async fn summary(&self, id: &str, sentences: Option<usize>) -> Result<Vec<String>> {
        let mut article = self.get(id).await?;

        if let Some(summary) = article.summary {
            return Ok(summary);
        }

        let sentences = sentences.filter(|&n| n > 0).unwrap_or(DEFAULT_SUMMARY_SENTENCES);
        let fetched = self.fetcher.fetch_html(&article.source).await?;
        let readable = extract_readable(&fetched.text, &fetched.resolved_url)?;
        let summary = summarize(&readable.content, sentences);

        article.summary = Some(summary.clone());
        self.store.upsert(&article).await?;
        Ok(summary)
    }

    /// Stores an uploaded file under a fresh time-prefixed name.
    pub async fn upload(&self, filename: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        let stored_name = format!("{}_{}", generate_id(), filename);
        self.blobs.upload(&stored_name, bytes, content_type).await
    }

    /// The public retrieval URL for an uploaded file.
    pub fn blob_public_url(&self, name: &str) -> String {
        self.blobs.public_url(name)
    }

    /// Raw blob bytes for the retrieval endpoint.
    pub async fn blob_get(&self, name: &str) -> Result<Option<(Vec<u8>, String)>> {
        self.blobs.get(name).await
    }
}

/// Ids are fixed-width digit strings, so numeric and lexicographic order
/// agree; parsing keeps the comparison honest if a foreign id ever shows
/// up shorter.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u128>(), b.parse::<u128>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        _ => a.cmp(b),
    }
}

/// The sortable string projection of an article field.
fn field_value(article: &Article, field: &str) -> String {
    match field {
        "title" => article.title.clone(),
        "source" => article.source.clone(),
        "note" => article.note.clone(),
        "date" => article
            .date
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default(),
        "status" => match article.status {
            crate::article::Status::Unread => "unread".to_string(),
            crate::article::Status::Read => "read".to_string(),
        },
        _ => article.id.clone(),
    }
}
