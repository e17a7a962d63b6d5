use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogService;

/// Create routes for the catalog feature
///
/// Note: This feature is public (no authentication required)
pub fn routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/api/categories", get(handlers::list_categories))
        .route(
            "/api/categories/{id}/subcategories",
            get(handlers::list_subcategories),
        )
        .with_state(service)
}
