//! Entity CRUD handlers: list, read, create, update, delete.
//! The entity is attached to each route as an extension by `entity_routes`.

use crate::error::AppError;
use crate::model::{ColumnDef, EntityDef};
use crate::response::{created, deleted, success_many, success_one, updated};
use crate::service::{RelationResolver, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use serde_json::Value;
use std::collections::HashMap;

fn parse_id(id_str: &str) -> Result<i32, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

/// Query params naming a writable column become exact-match filters; anything else is ignored.
fn filters_from_query<'e>(entity: &'e EntityDef, params: &HashMap<String, String>) -> Vec<(&'e ColumnDef, Value)> {
    let mut filters: Vec<(&ColumnDef, Value)> = params
        .iter()
        .filter_map(|(k, v)| entity.column(k).map(|c| (c, Value::String(v.clone()))))
        .collect();
    filters.sort_by_key(|(c, _)| c.name);
    filters
}

pub async fn list(
    State(state): State<AppState>,
    Extension(entity): Extension<&'static EntityDef>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let filters = filters_from_query(entity, &params);
    let rows = RelationResolver::list(&state.store, entity, &filters).await?;
    Ok(success_many(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Extension(entity): Extension<&'static EntityDef>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let row = RelationResolver::get(&state.store, entity, id).await?;
    Ok(success_one(row))
}

pub async fn create(
    State(state): State<AppState>,
    Extension(entity): Extension<&'static EntityDef>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body?;
    let body = RequestValidator::body_to_map(body)?;
    RequestValidator::validate(entity, &body)?;
    let id = state.store.create(entity, &body).await?;
    Ok(created(entity, id))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(entity): Extension<&'static EntityDef>,
    Path(id_str): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let Json(body) = body?;
    let body = RequestValidator::body_to_map(body)?;
    RequestValidator::validate(entity, &body)?;
    state.store.update(entity, id, &body).await?;
    Ok(updated(entity))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(entity): Extension<&'static EntityDef>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    state.store.delete(entity, id).await?;
    Ok(deleted(entity))
}
