//! Entity CRUD routes, one pair of paths per declared entity.
//! Each route carries its `EntityDef` as an extension so handlers never look it up by path.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::model::ENTITIES;
use crate::state::AppState;
use axum::{routing::get, Extension, Router};

pub fn entity_routes(state: AppState) -> Router {
    ENTITIES
        .iter()
        .copied()
        .fold(Router::new(), |router, entity| {
            router
                .route(
                    &format!("/{}", entity.path_segment),
                    get(list).post(create).layer(Extension(entity)),
                )
                .route(
                    &format!("/{}/:id", entity.path_segment),
                    get(read).put(update).delete(delete_handler).layer(Extension(entity)),
                )
        })
        .with_state(state)
}
