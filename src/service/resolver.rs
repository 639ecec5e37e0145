//! Enriched reads: each foreign key is returned alongside the referenced entity's display name.

use crate::error::AppError;
use crate::model::{ColumnDef, EntityDef};
use crate::sql::{select_resolved_by_id, select_resolved_list};
use crate::store::EntityStore;
use serde_json::Value;

pub struct RelationResolver;

impl RelationResolver {
    /// One row with resolved names. A null or dangling key yields a null name; the row is never dropped.
    pub async fn get(store: &EntityStore, entity: &EntityDef, id: i32) -> Result<Value, AppError> {
        let q = select_resolved_by_id(entity, id);
        store
            .fetch_optional(&q)
            .await?
            .ok_or_else(|| AppError::NotFound(entity.label.to_string()))
    }

    /// All rows (optionally narrowed by exact-match filters) with resolved names, in list order.
    pub async fn list(
        store: &EntityStore,
        entity: &EntityDef,
        filters: &[(&ColumnDef, Value)],
    ) -> Result<Vec<Value>, AppError> {
        let q = select_resolved_list(entity, filters);
        let rows = store.fetch_all(&q).await?;
        tracing::debug!(entity = entity.label, count = rows.len(), "listed");
        Ok(rows)
    }
}
