//! Standard response envelope helpers.

use crate::model::EntityDef;
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
}

#[derive(Serialize)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize)]
pub struct MetaCount {
    pub count: u64,
}

/// Write confirmation. `assigned` carries the new identifier under the entity's key on create.
#[derive(Serialize)]
pub struct Confirmation {
    pub message: String,
    #[serde(flatten)]
    pub assigned: Option<Map<String, Value>>,
}

pub fn success_one<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { data }))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount { count },
        }),
    )
}

/// `201 {"message": "Character added", "CharacterID": 42}`
pub fn created(entity: &EntityDef, id: i32) -> (StatusCode, Json<Confirmation>) {
    let mut assigned = Map::new();
    assigned.insert(entity.primary_key.to_string(), Value::from(id));
    (
        StatusCode::CREATED,
        Json(Confirmation {
            message: format!("{} added", entity.label),
            assigned: Some(assigned),
        }),
    )
}

pub fn updated(entity: &EntityDef) -> (StatusCode, Json<Confirmation>) {
    confirm(format!("{} updated successfully", entity.label))
}

pub fn deleted(entity: &EntityDef) -> (StatusCode, Json<Confirmation>) {
    confirm(format!("{} deleted successfully", entity.label))
}

fn confirm(message: String) -> (StatusCode, Json<Confirmation>) {
    (
        StatusCode::OK,
        Json(Confirmation {
            message,
            assigned: None,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CHARACTER, HISTORY_ENTRY};
    use serde_json::json;

    #[test]
    fn created_carries_identifier_under_primary_key() {
        let (status, Json(body)) = created(&CHARACTER, 42);
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"message": "Character added", "CharacterID": 42})
        );
    }

    #[test]
    fn delete_confirmation_has_only_message() {
        let (_, Json(body)) = deleted(&HISTORY_ENTRY);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            json!({"message": "History entry deleted successfully"})
        );
    }

    #[test]
    fn many_counts_rows() {
        let (_, Json(body)) = success_many(vec![json!({"ReligionID": 1}), json!({"ReligionID": 2})]);
        assert_eq!(serde_json::to_value(body).unwrap()["meta"]["count"], 2);
    }
}
