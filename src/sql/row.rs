//! Decode a PostgreSQL row into JSON using the statement's projection.

use crate::model::ColumnType;
use crate::sql::Projection;
use serde_json::{Map, Value};
use sqlx::postgres::{PgRow, Postgres};
use sqlx::{Decode, Row, Type};

pub fn row_to_json(row: &PgRow, projection: &[Projection]) -> Value {
    let mut map = Map::with_capacity(projection.len());
    for col in projection {
        map.insert(col.name.clone(), cell_to_value(row, col));
    }
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, col: &Projection) -> Value {
    let name = col.name.as_str();
    let v = match col.ty {
        ColumnType::Integer => decode::<i32>(row, name).map(Value::from),
        ColumnType::Float => decode::<f64>(row, name)
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        ColumnType::Text => decode::<String>(row, name).map(Value::String),
        ColumnType::Timestamp => decode::<chrono::DateTime<chrono::Utc>>(row, name).map(|d| Value::String(d.to_rfc3339())),
    };
    v.unwrap_or(Value::Null)
}

fn decode<'r, T>(row: &'r PgRow, name: &str) -> Option<T>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    match row.try_get::<Option<T>, _>(name) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(column = name, error = %e, "column decode failed");
            None
        }
    }
}
