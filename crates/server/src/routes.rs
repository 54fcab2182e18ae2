//! REST surface.
//!
//! Thin handlers over [`ArticleService`]; paths, methods, and status codes
//! match what the browsing front end already polls.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::article::{ArticleUpdate, NewArticle};
use crate::error::{ApiError, Result};
use crate::service::{ArticleService, DEFAULT_PAGE_SIZE, ListOptions};

type ServiceState = State<Arc<ArticleService>>;

/// Builds the application router.
pub fn build_router(service: Arc<ArticleService>) -> Router {
    Router::new()
        .route("/api/articles", get(list_articles).post(create_article))
        .route("/api/articles/tags", get(list_tags))
        .route("/api/articles/upload", axum::routing::post(upload_article))
        .route(
            "/api/articles/{id}",
            get(get_article).put(replace_article).delete(delete_article),
        )
        .route("/articles/{id}/markdown", get(markdown_page))
        .route("/articles/{id}/readability", get(readability))
        .route("/articles/{id}/summary", get(summary))
        .route("/uploads/{filename}", get(upload_redirect))
        .route("/files/{name}", get(serve_blob))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(120)))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    sort: Option<String>,
    archived: Option<String>,
    reverse: Option<String>,
}

async fn list_articles(State(service): ServiceState, Query(query): Query<ListQuery>) -> Result<impl IntoResponse> {
    let options = ListOptions {
        sort: query.sort,
        exclude_archived: query.archived.as_deref() == Some("true"),
        reverse: query.reverse.as_deref() == Some("true"),
    };

    let articles = service.list(&options).await?;
    Ok(Json(articles))
}

async fn create_article(State(service): ServiceState, Json(payload): Json<NewArticle>) -> Result<impl IntoResponse> {
    let article = service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

async fn get_article(State(service): ServiceState, Path(id): Path<String>) -> Result<impl IntoResponse> {
    let article = service.get(&id).await?;
    Ok(Json(article))
}

async fn replace_article(
    State(service): ServiceState, Path(id): Path<String>, Json(payload): Json<ArticleUpdate>,
) -> Result<impl IntoResponse> {
    let article = service.replace(&id, payload).await?;
    Ok(Json(article))
}

async fn delete_article(State(service): ServiceState, Path(id): Path<String>) -> Result<impl IntoResponse> {
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_tags(State(service): ServiceState) -> Result<impl IntoResponse> {
    let tags = service.tags().await?;
    Ok(Json(tags))
}

async fn upload_article(State(service): ServiceState, mut multipart: Multipart) -> Result<impl IntoResponse> {
    let mut title = String::new();
    let mut file: Option<(String, Vec<u8>, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Upload(e.to_string()))?
    {
        let name = field.name().map(|s| s.to_string());
        match name.as_deref() {
            Some("articleSource") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(|e| ApiError::Upload(e.to_string()))?;
                file = Some((filename, bytes.to_vec(), content_type));
            }
            Some("title") => {
                title = field.text().await.map_err(|e| ApiError::Upload(e.to_string()))?;
            }
            _ => {}
        }
    }

    let (filename, bytes, content_type) = file.ok_or_else(|| ApiError::Upload("No file uploaded.".to_string()))?;
    let stored_name = service.upload(&filename, &bytes, &content_type).await?;

    Ok(Json(json!({
        "message": "File uploaded successfully",
        "url": stored_name,
        "title": title,
    })))
}

#[derive(Debug, Deserialize)]
struct MarkdownQuery {
    page: Option<usize>,
    #[serde(rename = "pageSize")]
    page_size: Option<usize>,
}

async fn markdown_page(
    State(service): ServiceState, Path(id): Path<String>, Query(query): Query<MarkdownQuery>,
) -> Result<impl IntoResponse> {
    let page = service
        .markdown_page(&id, query.page.unwrap_or(1), query.page_size.unwrap_or(DEFAULT_PAGE_SIZE))
        .await?;
    Ok(Json(page))
}

async fn readability(State(service): ServiceState, Path(id): Path<String>) -> Result<impl IntoResponse> {
    let readable = service.readability(&id).await?;
    Ok(Json(readable))
}

#[derive(Debug, Deserialize)]
struct SummaryQuery {
    sentences: Option<usize>,
}

async fn summary(
    State(service): ServiceState, Path(id): Path<String>, Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse> {
    let sentences = service.summary(&id, query.sentences).await?;
    Ok(Json(sentences))
}

async fn upload_redirect(State(service): ServiceState, Path(filename): Path<String>) -> Result<impl IntoResponse> {
    // The wire contract is a plain 302, which axum's Redirect helpers
    // do not emit.
    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, service.blob_public_url(&filename))],
    ))
}

async fn serve_blob(State(service): ServiceState, Path(name): Path<String>) -> Result<impl IntoResponse> {
    let (bytes, content_type) = service.blob_get(&name).await?.ok_or(ApiError::NotFound)?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}
