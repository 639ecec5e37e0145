#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use fantasy_wiki::{app_router, AppConfig, AppState, Environment};
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test config: development mode unless `production`, uploads written to `upload_dir`.
pub fn test_config(upload_dir: &TempDir, production: bool) -> AppConfig {
    AppConfig {
        database_url: String::new(),
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        upload_dir: upload_dir.path().to_path_buf(),
        max_upload_bytes: 5 * 1024 * 1024,
        db_max_connections: 5,
        environment: if production {
            Environment::Production
        } else {
            Environment::Development
        },
    }
}

/// Full router over `pool`, same layers as the binary. Keep the returned directory alive for the test.
pub fn build_test_app(pool: PgPool) -> (Router, TempDir) {
    build_app(pool, false)
}

pub fn build_production_app(pool: PgPool) -> (Router, TempDir) {
    build_app(pool, true)
}

fn build_app(pool: PgPool, production: bool) -> (Router, TempDir) {
    let uploads = tempfile::tempdir().expect("temp upload dir");
    let state = AppState::new(pool, test_config(&uploads, production));
    (app_router(state), uploads)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::delete(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    json_request(app, Method::PUT, uri, body).await
}

async fn json_request(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// POST an unparsed body, optionally without a Content-Type header.
pub async fn post_raw(app: &Router, uri: &str, content_type: Option<&str>, body: &str) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(ct) = content_type {
        builder = builder.header(CONTENT_TYPE, ct);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).expect("response body is JSON")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

/// POST `body` and return the id assigned under `key`.
pub async fn create(app: &Router, uri: &str, key: &str, body: Value) -> i64 {
    let response = post_json(app, uri, body).await;
    assert_eq!(response.status(), 201, "create at {uri} failed");
    let json = body_json(response).await;
    json[key].as_i64().unwrap_or_else(|| panic!("missing {key} in {json}"))
}
