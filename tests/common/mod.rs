#![allow(dead_code)]

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use power_monitor::common::AppState;
use power_monitor::config::Config;
use power_monitor::routes;
use power_monitor::store::Store;

/// Fresh in-memory store with the schema applied.
pub async fn memory_store() -> Store {
    let store = Store::connect("sqlite::memory:")
        .await
        .expect("open in-memory store");
    store
        .initialize_schema()
        .await
        .expect("initialize schema");
    store
}

/// Router backed by `store`, serving the frontend from `frontend_dist`.
pub fn test_app(store: Store, frontend_dist: PathBuf) -> Router {
    let config = Config {
        frontend_dist,
        ..Config::default()
    };
    routes::build_router(AppState::new(store, config))
}

/// Router backed by a fresh in-memory store and no frontend bundle.
pub async fn api_app() -> Router {
    test_app(memory_store().await, PathBuf::from("does-not-exist"))
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
