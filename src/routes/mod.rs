//! Router assembly.

mod common;
mod entity;
mod upload;

pub use common::common_routes;
pub use entity::entity_routes;
pub use upload::{upload_routes, uploads_service};

use crate::error::expose_error_details;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    middleware, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// The full service: operational routes, `/api/*`, `/uploads/*`, with error-detail, tracing and CORS layers.
pub fn app_router(state: AppState) -> Router {
    let api = entity_routes(state.clone()).merge(upload_routes(state.clone()));
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", api)
        .merge(uploads_service(&state))
        .layer(middleware::from_fn_with_state(state.clone(), expose_error_details))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
