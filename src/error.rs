//! Typed errors and HTTP mapping.

use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("server-assigned column declared writable: table {table} column {column}")]
    ReservedColumn { table: String, column: String },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("store: {0}")]
    Store(#[from] sqlx::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Response extension carrying the full error body (with `details`) for internal failures.
/// Only `expose_error_details` turns it into the response body.
#[derive(Clone, Debug)]
pub struct InternalFailure(pub ErrorBody);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Store(sqlx::Error::RowNotFound) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
            AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        if !status.is_server_error() {
            let body = ErrorBody {
                error: ErrorDetail {
                    code: code.to_string(),
                    message: self.to_string(),
                    details: None,
                },
            };
            return (status, Json(body)).into_response();
        }

        tracing::error!(error = %self, code, "request failed");
        let generic = ErrorDetail {
            code: code.to_string(),
            message: "internal failure".to_string(),
            details: None,
        };
        let detailed = ErrorBody {
            error: ErrorDetail {
                details: Some(serde_json::Value::String(self.to_string())),
                ..generic.clone()
            },
        };
        let mut response = (status, Json(ErrorBody { error: generic })).into_response();
        response.extensions_mut().insert(InternalFailure(detailed));
        response
    }
}

/// Outside production, replaces generic internal-failure bodies with the detailed one.
pub async fn expose_error_details(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    if state.config.is_production() {
        return response;
    }
    match response.extensions_mut().remove::<InternalFailure>() {
        Some(InternalFailure(body)) => (response.status(), Json(body)).into_response(),
        None => response,
    }
}
