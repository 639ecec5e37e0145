//! Required-field checks from the entity declaration.

use crate::error::AppError;
use crate::model::EntityDef;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Every required column must be present, non-null and not blank. Reports the first missing
    /// field in declaration order. Types are not checked here; the store rejects malformed values.
    pub fn validate(entity: &EntityDef, body: &Map<String, Value>) -> Result<(), AppError> {
        for col in entity.required_columns() {
            if is_missing(body.get(col.name)) {
                return Err(AppError::Validation(format!("{} is required", col.name)));
            }
        }
        Ok(())
    }

    /// Request bodies must be JSON objects.
    pub fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
        match value {
            Value::Object(m) => Ok(m),
            _ => Err(AppError::BadRequest("body must be a JSON object".into())),
        }
    }
}

fn is_missing(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
