//! Shared helpers for the integration suites
#![allow(dead_code)] // each suite uses a different subset

use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use ollama_cloud_gateway::{
    api::routes::create_router, backend::ChatDispatch, config::Settings, registry::ModelRegistry,
    AppState,
};

/// Build a router whose backends point at the given base URLs
pub fn test_router(anthropic_url: &str, openai_url: &str) -> Router {
    let mut settings = Settings::default();
    settings.backends.anthropic.base_url = anthropic_url.to_string();
    settings.backends.anthropic.token_env = None;
    settings.backends.openai.base_url = openai_url.to_string();
    settings.backends.openai.token_env = None;

    let registry = ModelRegistry::builtin();
    let chat = ChatDispatch::new(&settings.backends).unwrap();

    create_router(Arc::new(AppState {
        settings,
        registry,
        chat,
    }))
}

/// Router for endpoints that never reach a backend
pub fn offline_router() -> Router {
    test_router("http://127.0.0.1:9", "http://127.0.0.1:9")
}

/// Drive one request through the router and collect the full body
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub fn post_json(path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}
