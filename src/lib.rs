//! Fantasy wiki: REST backend over six related lore entities, stored in PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, Environment};
pub use error::{AppError, ConfigError, ModelError};
pub use model::{entity_by_path, EntityDef, EntityKind, ENTITIES};
pub use routes::app_router;
pub use service::{RelationResolver, RequestValidator};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, run_migrations, EntityStore};
