//! The article record and its request payloads.
//!
//! This is the typed replacement for the duck-typed JSON blob the service
//! historically persisted: payload shapes are declared here and unknown
//! fields are rejected at the boundary instead of being silently stored.
//! Field names on the wire stay camelCase for compatibility with existing
//! records and the browsing front end.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use legenda_core::readtime::ReadingTime;

/// Extraction strategy for an article source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    Url,
    Pdf,
    Html,
    Text,
}

/// User-controlled read status, independent of archival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Unread,
    Read,
}

/// A tracked reading item.
///
/// `markdown` and `summary` are derived caches keyed implicitly by `id`:
/// absent until first requested, then written once and reused, never
/// recomputed even if `source` later changes. `read` is computed once at
/// creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub source: String,
    pub file_type: FileType,
    pub status: Status,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub note: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read: Option<ReadingTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<String>>,
}

impl Article {
    /// Whether the markdown cache should be filled by the PDF renderer
    /// rather than the readability extractor.
    pub fn is_pdf(&self) -> bool {
        self.file_type == FileType::Pdf || self.source.ends_with(".pdf")
    }
}

/// Body of `POST /api/articles`.
///
/// `id`, `date`, and `read` are always assigned server-side; payloads
/// carrying unknown fields are rejected rather than persisted as-is.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewArticle {
    pub title: String,
    pub source: String,
    pub file_type: FileType,
    #[serde(default = "default_status")]
    pub status: Status,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub note: String,
}

/// Body of `PUT /api/articles/{id}`: a full-record replace.
///
/// The caller must resend unchanged fields; whatever is omitted is gone
/// after the write (last writer wins, there is no merging). Any `id` in the
/// body is ignored in favor of the path parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArticleUpdate {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub source: String,
    pub file_type: FileType,
    pub status: Status,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub note: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    #[serde(default)]
    pub read: Option<ReadingTime>,
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub summary: Option<Vec<String>>,
}

impl ArticleUpdate {
    /// Materializes the replacement record under the path id.
    pub fn into_article(self, id: String) -> Article {
        Article {
            id,
            title: self.title,
            source: self.source,
            file_type: self.file_type,
            status: self.status,
            archived: self.archived,
            tags: dedupe_tags(self.tags),
            note: self.note,
            date: self.date,
            read: self.read,
            markdown: self.markdown,
            summary: self.summary,
        }
    }
}

fn default_status() -> Status {
    Status::Unread
}

/// Collapses duplicate tags, keeping first-seen order.
///
/// Applied on every mutation so the stored set stays deduplicated no matter
/// what the client sends.
pub fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter().filter(|tag| seen.insert(tag.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article {
            id: "20260830120000000123456".to_string(),
            title: "T".to_string(),
            source: "https://example.com/a".to_string(),
            file_type: FileType::Url,
            status: Status::Unread,
            archived: false,
            tags: vec!["rust".to_string()],
            note: String::new(),
            date: OffsetDateTime::UNIX_EPOCH,
            read: None,
            markdown: None,
            summary: None,
        }
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["fileType"], "URL");
        assert_eq!(json["status"], "unread");
        // Unset caches are omitted, not serialized as null.
        assert!(json.get("markdown").is_none());
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_round_trip() {
        let article = sample();
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, article.id);
        assert_eq!(back.file_type, FileType::Url);
    }

    #[test]
    fn test_new_article_rejects_unknown_fields() {
        let body = r#"{"title":"T","source":"https://e.com","fileType":"URL","bogus":1}"#;
        assert!(serde_json::from_str::<NewArticle>(body).is_err());
    }

    #[test]
    fn test_new_article_defaults() {
        let body = r#"{"title":"T","source":"https://e.com","fileType":"URL"}"#;
        let payload: NewArticle = serde_json::from_str(body).unwrap();
        assert_eq!(payload.status, Status::Unread);
        assert!(!payload.archived);
        assert!(payload.tags.is_empty());
    }

    #[test]
    fn test_is_pdf_by_type_or_extension() {
        let mut article = sample();
        assert!(!article.is_pdf());

        article.source = "uploads/paper.pdf".to_string();
        assert!(article.is_pdf());

        article.source = "https://example.com/page".to_string();
        article.file_type = FileType::Pdf;
        assert!(article.is_pdf());
    }

    #[test]
    fn test_dedupe_tags_keeps_first_seen_order() {
        let tags = vec!["b".to_string(), "a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(dedupe_tags(tags), vec!["b".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_update_ignores_body_id() {
        let body = r#"{"id":"evil","title":"T","source":"s","fileType":"URL",
                       "status":"read","date":"2026-01-01T00:00:00Z"}"#;
        let update: ArticleUpdate = serde_json::from_str(body).unwrap();
        let article = update.into_article("real".to_string());
        assert_eq!(article.id, "real");
        assert_eq!(article.status, Status::Read);
    }
}
