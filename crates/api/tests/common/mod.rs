#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use watchlist_api::config::{CorsOrigins, LogFormat, ServerConfig};
use watchlist_api::router::build_app_router;
use watchlist_api::state::AppState;
use watchlist_core::seed::seed_records;
use watchlist_core::validation::ValidationRules;
use watchlist_db::store::MemoryRecordStore;
use watchlist_db::{RecordStore, StoreBackend};

/// Build a test `ServerConfig` with safe defaults: any CORS origin, an
/// in-memory backend and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        cors_origins: CorsOrigins::Any,
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
        validation: ValidationRules::default(),
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over `store` with the production
/// middleware stack.
pub fn build_test_app(store: Arc<dyn RecordStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<dyn RecordStore>, config: ServerConfig) -> Router {
    let state = AppState::new(store, Arc::new(config.clone()));
    build_app_router(state, &config)
}

/// An in-memory store holding the 35 starter records.
pub async fn seeded_store() -> Arc<dyn RecordStore> {
    let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
    store.seed_if_uninitialized(seed_records()).await.unwrap();
    store
}

/// A valid record payload; tests override individual fields.
pub fn valid_payload() -> serde_json::Value {
    serde_json::json!({
        "title": "Arrival",
        "type": "Movie",
        "genre": "Sci-Fi",
        "year": 2016,
        "rating": 8,
        "status": "Completed",
        "notes": "",
        "image_url": "https://img.example/arrival.jpg"
    })
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

pub async fn post_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(body.to_string())).await
}

pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    send(app, Method::POST, uri, Body::from(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: &serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Body::from(body.to_string())).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty()).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
