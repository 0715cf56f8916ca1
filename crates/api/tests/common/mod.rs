#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use ingest_api::config::{AdminCredentials, ServerConfig};
use ingest_api::router::build_app_router;
use ingest_api::state::AppState;

pub const TEST_API_KEY: &str = "test-ingest-key";
pub const TEST_ADMIN_USER: &str = "admin";
pub const TEST_ADMIN_PASS: &str = "test-admin-pass";

/// Build a test `ServerConfig` with known credentials.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["https://www.mapcamera.com".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 1024 * 1024,
        api_key: TEST_API_KEY.to_string(),
        admin: AdminCredentials {
            username: TEST_ADMIN_USER.to_string(),
            password: TEST_ADMIN_PASS.to_string(),
        },
    }
}

/// Build the application router exactly as `main.rs` does.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

/// GET with HTTP Basic credentials.
pub async fn get_as_admin(app: Router, uri: &str, username: &str, password: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", basic_auth(username, password))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// POST a JSON body with the given `x-api-key` (or none).
pub async fn post_json_with_key(
    app: Router,
    uri: &str,
    api_key: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// POST a JSON body with the test API key.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_json_with_key(app, uri, Some(TEST_API_KEY), body).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
