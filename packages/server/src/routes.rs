use crate::errors::{ApiError, ServerError};
use crate::pages::NOT_FOUND_PAGE;
use crate::records::{normalize_domain, RecordStore};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde_json::Value;
use std::sync::Arc;
use storefront_content::{ContentDocument, ContentStore, StoreError};
use tracing::{debug, info};

/// Render the published store for a domain, `None` when there is nothing to
/// serve there
pub fn render_for_domain(state: &AppState, domain: &str) -> Result<Option<String>, ServerError> {
    let Some(record) = state.records.load(domain)? else {
        debug!(domain = %domain, "No store for domain");
        return Ok(None);
    };
    if !record.published {
        debug!(domain = %domain, "Store is not published");
        return Ok(None);
    }

    let template = state
        .catalog
        .load_named(&record.template)
        .map_err(storefront_compiler_html::RenderError::from)?;
    let html = state.renderer.render_json(
        &template,
        record.content.as_ref(),
        &record.products,
        &record.profile,
        &state.resolver,
    );
    Ok(Some(html))
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response()
}

/// `GET /`: the public page for the request's `Host`
pub async fn public_page(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Result<Response, ServerError> {
    let Some(domain) = headers
        .get(header::HOST)
        .and_then(|host| host.to_str().ok())
        .and_then(normalize_domain)
    else {
        return Ok(not_found());
    };

    let rendered = tokio::task::spawn_blocking({
        let domain = domain.clone();
        move || render_for_domain(&state, &domain)
    })
    .await??;

    Ok(match rendered {
        Some(html) => {
            info!(domain = %domain, "Served public page");
            Html(html).into_response()
        }
        None => not_found(),
    })
}

/// `GET /api/stores/:domain/content`: the stored content document, or an
/// empty one when the store has never saved
pub async fn get_content(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let domain = normalize_domain(&domain).ok_or_else(|| ApiError::NotFound(domain.clone()))?;

    let record = tokio::task::spawn_blocking({
        let domain = domain.clone();
        move || state.records.load(&domain)
    })
    .await??
    .ok_or_else(|| ApiError::NotFound(domain.clone()))?;

    let content = match record.content {
        Some(content) => content,
        None => ContentDocument::new().to_value().map_err(StoreError::from)?,
    };
    Ok(Json(content))
}

/// `PUT /api/stores/:domain/content`: replace the content document.
/// Last write wins.
pub async fn put_content(
    State(state): State<Arc<AppState>>,
    Path(domain): Path<String>,
    Json(content): Json<Value>,
) -> Result<StatusCode, ApiError> {
    let domain = normalize_domain(&domain).ok_or_else(|| ApiError::NotFound(domain.clone()))?;
    if !content.is_object() {
        return Err(ApiError::InvalidContent);
    }

    let (_, errors) = ContentDocument::from_value_lenient(&content);
    if !errors.is_empty() {
        debug!(domain = %domain, count = errors.len(), "Saving content with fields that will be recovered on read");
    }

    tokio::task::spawn_blocking({
        let domain = domain.clone();
        move || state.records.save_content(&domain, &content)
    })
    .await??;

    info!(domain = %domain, "Saved content document");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn healthz() -> &'static str {
    "ok"
}
