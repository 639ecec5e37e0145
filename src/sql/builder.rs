//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from the declared entity.

use crate::model::{ColumnDef, ColumnType, EntityDef, CREATED_DATE, LAST_MODIFIED_DATE};
use serde_json::{Map, Value};

const MAIN_ALIAS: &str = "main";

/// Output column of a statement and the type it decodes as.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub name: String,
    pub ty: ColumnType,
}

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
    pub projection: Vec<Projection>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
            projection: Vec::new(),
        }
    }

    /// Push a param and return its placeholder with the cast for `ty`.
    fn push_param(&mut self, v: Value, ty: ColumnType) -> String {
        self.params.push(v);
        format!("${}::{}", self.params.len(), ty.pg_cast())
    }
}

/// Quote identifier for PostgreSQL (safe: only from the entity model).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn main_col(name: &str) -> String {
    format!("{}.{}", MAIN_ALIAS, quoted(name))
}

fn join_alias(i: usize) -> String {
    format!("j{}", i)
}

fn stored_projection(entity: &EntityDef) -> Vec<Projection> {
    entity
        .stored_columns()
        .into_iter()
        .map(|(name, ty)| Projection {
            name: name.to_string(),
            ty,
        })
        .collect()
}

/// SELECT list and FROM clause. With `resolve`, each relation adds a LEFT JOIN and its display column.
fn select_from(entity: &EntityDef, resolve: bool, q: &mut QueryBuf) -> String {
    let mut exprs: Vec<String> = entity.stored_columns().iter().map(|(name, _)| main_col(name)).collect();
    q.projection = stored_projection(entity);
    let mut from = format!("{} {}", quoted(entity.table_name), MAIN_ALIAS);

    if resolve {
        for (i, rel) in entity.relations.iter().enumerate() {
            let target = rel.target.def();
            let alias = join_alias(i);
            exprs.push(format!(
                "{}.{} AS {}",
                alias,
                quoted(target.display_column),
                quoted(rel.resolved_as)
            ));
            from.push_str(&format!(
                " LEFT JOIN {} {} ON {}.{} = {}",
                quoted(target.table_name),
                alias,
                alias,
                quoted(target.primary_key),
                main_col(rel.column)
            ));
            q.projection.push(Projection {
                name: rel.resolved_as.to_string(),
                ty: ColumnType::Text,
            });
        }
    }
    format!("SELECT {} FROM {}", exprs.join(", "), from)
}

fn order_clause(entity: &EntityDef) -> String {
    let cols: Vec<String> = entity
        .list_order
        .iter()
        .chain(std::iter::once(&entity.primary_key))
        .map(|c| main_col(c))
        .collect();
    format!(" ORDER BY {}", cols.join(", "))
}

fn by_id(entity: &EntityDef, id: i32, resolve: bool) -> QueryBuf {
    let mut q = QueryBuf::new();
    let select = select_from(entity, resolve, &mut q);
    let ph = q.push_param(Value::from(id), ColumnType::Integer);
    q.sql = format!("{} WHERE {} = {}", select, main_col(entity.primary_key), ph);
    q
}

fn list(entity: &EntityDef, filters: &[(&ColumnDef, Value)], resolve: bool) -> QueryBuf {
    let mut q = QueryBuf::new();
    let select = select_from(entity, resolve, &mut q);
    let where_parts: Vec<String> = filters
        .iter()
        .map(|(col, val)| {
            let ph = q.push_param(val.clone(), col.ty);
            format!("{} = {}", main_col(col.name), ph)
        })
        .collect();
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!("{}{}{}", select, where_clause, order_clause(entity));
    q
}

/// Raw row by primary key.
pub fn select_by_id(entity: &EntityDef, id: i32) -> QueryBuf {
    by_id(entity, id, false)
}

/// Raw rows in list order.
pub fn select_list(entity: &EntityDef) -> QueryBuf {
    list(entity, &[], false)
}

/// Row by primary key with every relation left-joined to its display name.
pub fn select_resolved_by_id(entity: &EntityDef, id: i32) -> QueryBuf {
    by_id(entity, id, true)
}

/// Rows with relations resolved, exact-match `filters` on writable columns, in list order.
pub fn select_resolved_list(entity: &EntityDef, filters: &[(&ColumnDef, Value)]) -> QueryBuf {
    list(entity, filters, true)
}

/// INSERT every writable column (absent → NULL), both timestamps NOW(), RETURNING the new key.
pub fn insert(entity: &EntityDef, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut cols = Vec::with_capacity(entity.columns.len() + 2);
    let mut values = Vec::with_capacity(entity.columns.len() + 2);
    for c in entity.columns {
        let val = body.get(c.name).cloned().unwrap_or(Value::Null);
        cols.push(quoted(c.name));
        values.push(q.push_param(val, c.ty));
    }
    for ts in [CREATED_DATE, LAST_MODIFIED_DATE] {
        cols.push(quoted(ts));
        values.push("NOW()".to_string());
    }
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(entity.table_name),
        cols.join(", "),
        values.join(", "),
        quoted(entity.primary_key)
    );
    q.projection = vec![Projection {
        name: entity.primary_key.to_string(),
        ty: ColumnType::Integer,
    }];
    q
}

/// UPDATE by id: overwrite every writable column (absent → NULL) and re-stamp LastModifiedDate.
/// CreatedDate is never touched. Returns the key so a missing row yields no row.
pub fn update(entity: &EntityDef, id: i32, body: &Map<String, Value>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets: Vec<String> = entity
        .columns
        .iter()
        .map(|c| {
            let val = body.get(c.name).cloned().unwrap_or(Value::Null);
            format!("{} = {}", quoted(c.name), q.push_param(val, c.ty))
        })
        .collect();
    sets.push(format!("{} = NOW()", quoted(LAST_MODIFIED_DATE)));
    let id_ph = q.push_param(Value::from(id), ColumnType::Integer);
    q.sql = format!(
        "UPDATE {} SET {} WHERE {} = {} RETURNING {}",
        quoted(entity.table_name),
        sets.join(", "),
        quoted(entity.primary_key),
        id_ph,
        quoted(entity.primary_key)
    );
    q.projection = vec![Projection {
        name: entity.primary_key.to_string(),
        ty: ColumnType::Integer,
    }];
    q
}

/// DELETE by id. Dependents are left as they are.
pub fn delete(entity: &EntityDef, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let ph = q.push_param(Value::from(id), ColumnType::Integer);
    q.sql = format!(
        "DELETE FROM {} WHERE {} = {}",
        quoted(entity.table_name),
        quoted(entity.primary_key),
        ph
    );
    q
}
