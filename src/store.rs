//! Entity store: single-statement CRUD over the six wiki tables, plus database bootstrap.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::model::EntityDef;
use crate::sql::{self, bind_params, row_to_json, QueryBuf};
use serde_json::{Map, Value};
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPool, PgPoolOptions, Postgres};
use sqlx::ConnectOptions;
use std::str::FromStr;

/// Request fields keyed by column name.
pub type Fields = Map<String, Value>;

/// Handle to the store. Cheap to clone; every operation checks out its own pooled
/// connection, which goes back to the pool when the operation returns or fails.
#[derive(Clone)]
pub struct EntityStore {
    pool: PgPool,
}

impl EntityStore {
    pub fn new(pool: PgPool) -> Self {
        EntityStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn acquire(&self) -> Result<PoolConnection<Postgres>, AppError> {
        Ok(self.pool.acquire().await?)
    }

    /// Insert a row and return its new identifier. Both timestamps are set by the store.
    pub async fn create(&self, entity: &EntityDef, fields: &Fields) -> Result<i32, AppError> {
        let q = sql::insert(entity, fields);
        let row = self.fetch_optional(&q).await?.ok_or(sqlx::Error::RowNotFound)?;
        let id = row
            .get(entity.primary_key)
            .and_then(Value::as_i64)
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| sqlx::Error::ColumnNotFound(entity.primary_key.to_string()))?;
        tracing::info!(entity = entity.label, id, "created");
        Ok(id)
    }

    /// Raw row, no relation resolution.
    pub async fn get_by_id(&self, entity: &EntityDef, id: i32) -> Result<Value, AppError> {
        let q = sql::select_by_id(entity, id);
        self.fetch_optional(&q)
            .await?
            .ok_or_else(|| AppError::NotFound(entity.label.to_string()))
    }

    /// Raw rows in list order, no relation resolution.
    pub async fn list_all(&self, entity: &EntityDef) -> Result<Vec<Value>, AppError> {
        self.fetch_all(&sql::select_list(entity)).await
    }

    /// Overwrite every writable column of `id`; LastModifiedDate is re-stamped, CreatedDate kept.
    pub async fn update(&self, entity: &EntityDef, id: i32, fields: &Fields) -> Result<(), AppError> {
        let q = sql::update(entity, id, fields);
        match self.fetch_optional(&q).await? {
            Some(_) => {
                tracing::info!(entity = entity.label, id, "updated");
                Ok(())
            }
            None => Err(AppError::NotFound(entity.label.to_string())),
        }
    }

    /// Delete `id`. Rows referencing it keep their (now dangling) key.
    pub async fn delete(&self, entity: &EntityDef, id: i32) -> Result<(), AppError> {
        let q = sql::delete(entity, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut conn = self.acquire().await?;
        let result = bind_params(sqlx::query(&q.sql), &q.params).execute(&mut *conn).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(entity.label.to_string()));
        }
        tracing::info!(entity = entity.label, id, "deleted");
        Ok(())
    }

    pub async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut conn = self.acquire().await?;
        let row = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(|r| row_to_json(&r, &q.projection)))
    }

    pub async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<Value>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut conn = self.acquire().await?;
        let rows = bind_params(sqlx::query(&q.sql), &q.params)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.iter().map(|r| row_to_json(r, &q.projection)).collect())
    }

    /// Round-trip to the store, for readiness checks.
    pub async fn ping(&self) -> Result<(), AppError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }
}

/// Open the pool. Failure here is fatal at boot.
pub async fn connect(config: &AppConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
