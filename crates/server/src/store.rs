//! The article store and blob store collaborators.
//!
//! Articles live in Postgres as one `jsonb` document per id, with a
//! parallel `trash` collection for soft-deleted records; uploaded files go
//! into an `uploads` table addressed by stored name. The traits exist so
//! the lifecycle controller and the tests never depend on Postgres
//! directly; everything is injected at startup.

use async_trait::async_trait;
use deadpool_postgres::Pool;

use crate::article::Article;
use crate::error::{ApiError, Result};

/// Key-value collection of article records.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Loads every article in the primary collection, id order.
    async fn list_all(&self) -> Result<Vec<Article>>;

    /// Loads one article by id.
    async fn get(&self, id: &str) -> Result<Option<Article>>;

    /// Inserts or fully replaces the record with the article's id.
    ///
    /// Upsert-by-id means an id collision silently overwrites; that is the
    /// store contract the identifier scheme was built against.
    async fn upsert(&self, article: &Article) -> Result<()>;

    /// Removes a record from the primary collection.
    ///
    /// Returns whether a record existed.
    async fn delete_by_id(&self, id: &str) -> Result<bool>;

    /// Copies a record into the trash collection.
    async fn insert_trash(&self, article: &Article) -> Result<()>;
}

/// Object store for uploaded article files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores bytes under `name`, returning the stored name.
    async fn upload(&self, name: &str, bytes: &[u8], content_type: &str) -> Result<String>;

    /// Retrieves stored bytes and their content type.
    async fn get(&self, name: &str) -> Result<Option<(Vec<u8>, String)>>;

    /// The publicly retrievable URL for a stored blob.
    fn public_url(&self, stored_name: &str) -> String;
}

/// Strips any storage-path prefix from a blob reference, exactly once.
///
/// Older records carry their bucket prefix in `source` (`uploads/<name>`);
/// joining that against a base URL that already ends in the bucket path is
/// how the doubled `/uploads/uploads/` URLs happened. Normalizing here
/// keeps every public URL single-prefixed regardless of how the reference
/// was written.
pub fn normalize_blob_name(name: &str) -> &str {
    let name = name.trim_start_matches('/');
    name.strip_prefix("uploads/").unwrap_or(name)
}

/// Postgres-backed [`ArticleStore`].
pub struct PgArticleStore {
    pool: Pool,
}

impl PgArticleStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

fn storage_err<E: std::fmt::Display>(err: E) -> ApiError {
    ApiError::Storage(err.to_string())
}

fn to_doc(article: &Article) -> Result<serde_json::Value> {
    serde_json::to_value(article).map_err(storage_err)
}

fn from_doc(doc: serde_json::Value) -> Result<Article> {
    serde_json::from_value(doc).map_err(storage_err)
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn list_all(&self) -> Result<Vec<Article>> {
        let client = self.pool.get().await.map_err(storage_err)?;
        let rows = client
            .query("SELECT doc FROM articles ORDER BY id", &[])
            .await
            .map_err(storage_err)?;

        rows.into_iter().map(|row| from_doc(row.get(0))).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Article>> {
        let client = self.pool.get().await.map_err(storage_err)?;
        let row = client
            .query_opt("SELECT doc FROM articles WHERE id = $1", &[&id])
            .await
            .map_err(storage_err)?;

        row.map(|row| from_doc(row.get(0))).transpose()
    }

    async fn upsert(&self, article: &Article) -> Result<()> {
        let client = self.pool.get().await.map_err(storage_err)?;
        let doc = to_doc(article)?;
        client
            .execute(
                "INSERT INTO articles (id, doc) VALUES ($1, $2)
                 ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
                &[&article.id, &doc],
            )
            .await
            .map_err(storage_err)?;

        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let client = self.pool.get().await.map_err(storage_err)?;
        let deleted = client
            .execute("DELETE FROM articles WHERE id = $1", &[&id])
            .await
            .map_err(storage_err)?;

        Ok(deleted > 0)
    }

    async fn insert_trash(&self, article: &Article) -> Result<()> {
        let client = self.pool.get().await.map_err(storage_err)?;
        let doc = to_doc(article)?;
        client
            .execute(
                "INSERT INTO trash (id, doc) VALUES ($1, $2)
                 ON CONFLICT (id) DO UPDATE SET doc = EXCLUDED.doc",
                &[&article.id, &doc],
            )
            .await
            .map_err(storage_err)?;

        Ok(())
    }
}

/// Postgres-backed [`BlobStore`] whose public URLs point at this service's
/// own `/files/{name}` retrieval endpoint.
pub struct PgBlobStore {
    pool: Pool,
    public_base_url: String,
}

impl PgBlobStore {
    pub fn new(pool: Pool, public_base_url: String) -> Self {
        Self { pool, public_base_url: public_base_url.trim_end_matches('/').to_string() }
    }
}

#[async_trait]
impl BlobStore for PgBlobStore {
    async fn upload(&self, name: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        let client = self.pool.get().await.map_err(storage_err)?;
        client
            .execute(
                "INSERT INTO uploads (name, bytes, content_type) VALUES ($1, $2, $3)
                 ON CONFLICT (name) DO UPDATE SET bytes = EXCLUDED.bytes, content_type = EXCLUDED.content_type",
                &[&name, &bytes, &content_type],
            )
            .await
            .map_err(storage_err)?;

        Ok(name.to_string())
    }

    async fn get(&self, name: &str) -> Result<Option<(Vec<u8>, String)>> {
        let client = self.pool.get().await.map_err(storage_err)?;
        let row = client
            .query_opt(
                "SELECT bytes, content_type FROM uploads WHERE name = $1",
                &[&normalize_blob_name(name)],
            )
            .await
            .map_err(storage_err)?;

        Ok(row.map(|row| (row.get(0), row.get(1))))
    }

    fn public_url(&self, stored_name: &str) -> String {
        format!("{}/files/{}", self.public_base_url, normalize_blob_name(stored_name))
    }
}

/// Creates the backing tables when they do not exist yet.
pub async fn init_schema(pool: &Pool) -> Result<()> {
    let client = pool.get().await.map_err(storage_err)?;
    client
        .batch_execute(
            "CREATE TABLE IF NOT EXISTS articles (id TEXT PRIMARY KEY, doc JSONB NOT NULL);
             CREATE TABLE IF NOT EXISTS trash (id TEXT PRIMARY KEY, doc JSONB NOT NULL);
             CREATE TABLE IF NOT EXISTS uploads (
                 name TEXT PRIMARY KEY,
                 bytes BYTEA NOT NULL,
                 content_type TEXT NOT NULL
             );",
        )
        .await
        .map_err(storage_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_blob_name() {
        assert_eq!(normalize_blob_name("file.pdf"), "file.pdf");
        assert_eq!(normalize_blob_name("uploads/file.pdf"), "file.pdf");
        assert_eq!(normalize_blob_name("/uploads/file.pdf"), "file.pdf");
        // Only the storage prefix is stripped, and only once.
        assert_eq!(normalize_blob_name("uploads/uploads/file.pdf"), "uploads/file.pdf");
    }
}
