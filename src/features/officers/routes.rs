use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::officers::handlers;
use crate::features::officers::services::OfficerService;

/// Create routes for the officers feature
///
/// Requires auth middleware to be applied by the caller; handlers enforce
/// the admin role.
pub fn routes(service: Arc<OfficerService>) -> Router {
    Router::new()
        .route("/api/officers", get(handlers::list_officers))
        .route("/api/officers/{id}", get(handlers::get_officer))
        .with_state(service)
}
