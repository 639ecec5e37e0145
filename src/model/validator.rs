//! Model validation: referential integrity and route consistency of the declared entities.

use crate::error::ModelError;
use crate::model::{ColumnType, EntityDef, CREATED_DATE, LAST_MODIFIED_DATE};
use std::collections::HashSet;

/// Checks the entity declarations. Relations must target an entity declared earlier in `entities`,
/// which is the order tables are created in.
pub fn validate(entities: &[&EntityDef]) -> Result<(), ModelError> {
    let mut tables = HashSet::new();
    let mut path_segments = HashSet::new();
    let mut upload_kinds = HashSet::new();
    let mut declared = Vec::with_capacity(entities.len());

    for entity in entities {
        if !tables.insert(entity.table_name) {
            return Err(ModelError::Validation(format!("duplicate table {}", entity.table_name)));
        }
        if !path_segments.insert(entity.path_segment) {
            return Err(ModelError::DuplicatePathSegment(entity.path_segment.to_string()));
        }
        if !upload_kinds.insert(entity.upload_kind) {
            return Err(ModelError::Validation(format!("duplicate upload kind {}", entity.upload_kind)));
        }

        let reserved = [entity.primary_key, CREATED_DATE, LAST_MODIFIED_DATE];
        let mut names = HashSet::new();
        for c in entity.columns {
            if reserved.contains(&c.name) {
                return Err(ModelError::ReservedColumn {
                    table: entity.table_name.to_string(),
                    column: c.name.to_string(),
                });
            }
            if !names.insert(c.name) {
                return Err(ModelError::Validation(format!(
                    "duplicate column {}.{}",
                    entity.table_name, c.name
                )));
            }
        }
        if entity.column(entity.display_column).is_none() {
            return Err(ModelError::MissingReference {
                kind: "display column",
                id: format!("{}.{}", entity.table_name, entity.display_column),
            });
        }
        for col in entity.list_order {
            if entity.column(col).is_none() {
                return Err(ModelError::MissingReference {
                    kind: "order column",
                    id: format!("{}.{}", entity.table_name, col),
                });
            }
        }

        for rel in entity.relations {
            match entity.column(rel.column) {
                Some(c) if c.ty == ColumnType::Integer => {}
                _ => {
                    return Err(ModelError::MissingReference {
                        kind: "relation column",
                        id: format!("{}.{}", entity.table_name, rel.column),
                    })
                }
            }
            if !declared.contains(&rel.target) {
                return Err(ModelError::MissingReference {
                    kind: "relation target",
                    id: format!("{}.{} -> {:?}", entity.table_name, rel.column, rel.target),
                });
            }
        }
        declared.push(entity.kind);
    }
    Ok(())
}
