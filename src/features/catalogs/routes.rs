use std::sync::Arc;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::features::catalogs::handlers;
use crate::features::catalogs::services::CatalogService;

/// Create routes for the catalogs feature
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route(
            "/api/catalogs",
            get(handlers::list_catalogs).post(handlers::create_catalog),
        )
        .route("/api/catalogs/{id}", delete(handlers::delete_catalog))
        .with_state(service)
}
