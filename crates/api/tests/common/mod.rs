#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

use rnr_api::config::ServerConfig;
use rnr_api::router::build_app_router;
use rnr_api::state::AppState;

/// Admin token wired into the test configuration.
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_token: ADMIN_TOKEN.to_string(),
        sweep_interval_secs: 60,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration
/// tests exercise the same middleware stack that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&Value>,
    admin: bool,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if admin {
        builder = builder.header("x-admin-token", ADMIN_TOKEN);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, "GET", uri, None, false).await
}

pub async fn get_admin(app: &Router, uri: &str) -> Response {
    send(app, "GET", uri, None, true).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> Response {
    send(app, "POST", uri, Some(body), false).await
}

pub async fn post_json_admin(app: &Router, uri: &str, body: &Value) -> Response {
    send(app, "POST", uri, Some(body), true).await
}

pub async fn put_json(app: &Router, uri: &str, body: &Value) -> Response {
    send(app, "PUT", uri, Some(body), false).await
}

pub async fn put_json_admin(app: &Router, uri: &str, body: &Value) -> Response {
    send(app, "PUT", uri, Some(body), true).await
}

pub async fn delete_admin(app: &Router, uri: &str) -> Response {
    send(app, "DELETE", uri, None, true).await
}

/// Consume a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
