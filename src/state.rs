//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::store::EntityStore;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: EntityStore,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pool: PgPool, config: AppConfig) -> Self {
        AppState {
            store: EntityStore::new(pool),
            config: Arc::new(config),
        }
    }
}
