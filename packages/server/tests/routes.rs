use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use storefront_compiler_html::{RenderOptions, StaticRenderer};
use storefront_content::BaseUrlResolver;
use storefront_server::{router, AppState, FileRecordStore, MemoryRecordStore, RecordStore, StoreRecord};
use storefront_templates::TemplateCatalog;
use tower::ServiceExt;

fn fireside() -> StoreRecord {
    let mut record = StoreRecord::new("fireside.shop.example", "Fireside Pottery");
    record.profile.description = "Stoneware from the hills".into();
    record.template = "classic".into();
    record.published = true;
    record.products = json!([
        { "id": 1, "name": "Mug", "price": 199.5, "isActive": true },
        { "id": 2, "name": "Vase", "price": 80, "isActive": false }
    ]);
    record
}

fn app_with(records: Arc<dyn RecordStore>) -> Router {
    let renderer = StaticRenderer::new(RenderOptions {
        copyright_year: Some(2026),
        ..Default::default()
    });
    router(Arc::new(AppState::new(
        records,
        TemplateCatalog::embedded(),
        renderer,
        BaseUrlResolver::new("https://cdn.example.com"),
    )))
}

fn app() -> Router {
    let mut draft = StoreRecord::new("draft.shop.example", "Draft");
    draft.published = false;
    app_with(Arc::new(MemoryRecordStore::with_records([fireside(), draft])))
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn page_request(host: &str) -> Request<Body> {
    Request::builder()
        .uri("/")
        .header(header::HOST, host)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_public_page_by_host() {
    let response = app().oneshot(page_request("Fireside.Shop.Example:8080")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(">Fireside Pottery</h1>"));
    assert!(html.contains("₱199.50"));
    assert!(!html.contains("Vase"));
    assert!(html.contains("© 2026 Fireside Pottery. All rights reserved."));
}

#[tokio::test]
async fn test_unknown_and_unpublished_domains_are_404() {
    for host in ["nowhere.example", "draft.shop.example", "not a host"] {
        let response = app().oneshot(page_request(host)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", host);
        assert!(body_text(response).await.contains("Store not found"));
    }
}

#[tokio::test]
async fn test_missing_template_file_is_a_generic_500() {
    let renderer = StaticRenderer::default();
    let app = router(Arc::new(AppState::new(
        Arc::new(MemoryRecordStore::with_records([fireside()])),
        TemplateCatalog::from_dir("/nonexistent/storefront/templates"),
        renderer,
        BaseUrlResolver::default(),
    )));

    let response = app.oneshot(page_request("fireside.shop.example")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("Something went wrong"));
    assert!(!html.contains("nonexistent"));
}

#[tokio::test]
async fn test_content_api_round_trip_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let records = Arc::new(FileRecordStore::new(dir.path()));
    records.save(&fireside()).unwrap();
    let app = app_with(records.clone());

    let content = json!({
        "version": 1,
        "hero": { "title": "Hand-thrown", "buttonText": "Visit" },
        "elementStates": { "p-footer-text-crafted-with-patience-purpose": { "hidden": true } }
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/stores/fireside.shop.example/content")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(content.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/stores/fireside.shop.example/content")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stored: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(stored, content);

    let html = body_text(app.oneshot(page_request("fireside.shop.example")).await.unwrap()).await;
    assert!(html.contains(">Hand-thrown</h1>"));
    assert!(html.contains(">Visit</a>"));
}

#[tokio::test]
async fn test_content_api_errors() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/stores/nowhere.example/content")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/stores/fireside.shop.example/content")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("[1, 2]"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unsaved_store_gets_an_empty_document() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/stores/fireside.shop.example/content")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let document: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(document["version"], 1);
    assert_eq!(document["hero"]["title"], "");
}

#[tokio::test]
async fn test_healthz() {
    let response = app()
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}
