//! API error taxonomy and HTTP mapping.
//!
//! Store and pipeline failures are logged server-side with their detail and
//! reported to clients as opaque 500s; nothing internal leaks into response
//! bodies. A failing request never corrupts a stored record and never takes
//! the process down.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use legenda_core::LegendaError;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Unknown article id.
    #[error("Article not found")]
    NotFound,

    /// The tag listing has nothing to list.
    #[error("No articles found")]
    NoArticles,

    /// Missing or invalid multipart upload.
    #[error("Upload error: {0}")]
    Upload(String),

    /// Content pipeline failure: fetch, extraction, or PDF render.
    #[error(transparent)]
    Pipeline(#[from] LegendaError),

    /// Article or blob store failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Article not found".to_string()),
            ApiError::NoArticles => (StatusCode::NOT_FOUND, "No articles found".to_string()),
            ApiError::Upload(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::Pipeline(err) => {
                tracing::error!(error = %err, "content pipeline failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            ApiError::Storage(detail) => {
                tracing::error!(error = %detail, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_upload_maps_to_400() {
        let response = ApiError::Upload("No file uploaded.".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_detail_is_opaque() {
        let response = ApiError::Storage("connection refused to 10.0.0.3:5432".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
