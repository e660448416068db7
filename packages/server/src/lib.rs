//! # Storefront Server
//!
//! Serves the public store pages and the content API the editor saves
//! through.
//!
//! ```text
//! GET  /                               public page for the Host header
//! GET  /api/stores/:domain/content     content document JSON
//! PUT  /api/stores/:domain/content     replace it (last write wins)
//! GET  /healthz
//! ```
//!
//! Every page request reads one store record and one template, renders on
//! the blocking pool and shares nothing mutable with other requests.

mod config;
mod errors;
mod pages;
mod records;
mod routes;
mod state;

pub use config::{StorefrontConfig, DEFAULT_CONFIG_NAME};
pub use errors::{ApiError, ServerError};
pub use pages::{ERROR_PAGE, NOT_FOUND_PAGE};
pub use records::{normalize_domain, FileRecordStore, MemoryRecordStore, RecordStore, StoreRecord};
pub use routes::render_for_domain;
pub use state::AppState;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::public_page))
        .route("/healthz", get(routes::healthz))
        .route(
            "/api/stores/:domain/content",
            get(routes::get_content).put(routes::put_content),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until the process is stopped
pub async fn serve(config: StorefrontConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    tracing::info!(
        bind = %config.bind,
        data_dir = %config.data_dir.display(),
        templates = ?config.template_dir,
        "Storefront server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
