//! Image upload routes and the static `/uploads` file server.

use crate::handlers::upload::{upload_entity_image, upload_image};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::post, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;

/// Allowance for multipart boundaries and part headers on top of the image itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn upload_routes(state: AppState) -> Router {
    let limit = state.config.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);
    Router::new()
        .route("/upload/:kind", post(upload_entity_image))
        .route("/images/upload", post(upload_image))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(limit))
        .with_state(state)
}

/// Serves stored images at `/uploads/<filename>`.
pub fn uploads_service(state: &AppState) -> Router {
    Router::new().nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
}
