use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::imports::handlers;
use crate::features::imports::services::ImportService;

/// Create routes for the bulk upload feature
pub fn routes(service: Arc<ImportService>) -> Router {
    Router::new()
        .route(
            "/api/products/bulk-upload/preview",
            post(handlers::preview_bulk_upload),
        )
        .route(
            "/api/products/bulk-upload/import",
            post(handlers::import_products),
        )
        .route(
            "/api/products/bulk-upload/template",
            get(handlers::download_template),
        )
        .with_state(service)
}
