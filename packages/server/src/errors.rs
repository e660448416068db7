use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::json;
use storefront_compiler_html::RenderError;
use storefront_content::StoreError;
use thiserror::Error;

use crate::pages::ERROR_PAGE;

/// Failure serving the public page
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Visitors get the generic error page, never the cause
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Failed to render public page");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
    }
}

/// A failure on the JSON API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Store not found: {0}")]
    NotFound(String),

    #[error("Content must be a JSON object")]
    InvalidContent,

    #[error(transparent)]
    Server(#[from] ServerError),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound(domain) => ApiError::NotFound(domain),
            other => ApiError::Server(other.into()),
        }
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(error: tokio::task::JoinError) -> Self {
        ApiError::Server(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidContent => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Server(e) => {
                tracing::error!(error = %e, "Content API request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match &self {
            ApiError::Server(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
