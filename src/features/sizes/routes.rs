use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::sizes::handlers;
use crate::features::sizes::services::SizeService;

/// Create routes for the sizes feature
pub fn routes(service: Arc<SizeService>) -> Router {
    Router::new()
        .route(
            "/api/sizes",
            get(handlers::list_sizes).post(handlers::create_size),
        )
        .route(
            "/api/sizes/{id}",
            put(handlers::update_size).delete(handlers::delete_size),
        )
        .with_state(service)
}
