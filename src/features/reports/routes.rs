use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::features::reports::handlers::{self, ReportState};
use crate::features::reports::services::{LifecycleService, QueryService};

/// Create routes for the reports feature
///
/// All routes require the auth middleware to be applied by the caller;
/// mutation routes beyond submission additionally require the admin role.
pub fn routes(
    lifecycle_service: Arc<LifecycleService>,
    query_service: Arc<QueryService>,
) -> Router {
    let state = ReportState {
        lifecycle_service,
        query_service,
    };

    Router::new()
        .route(
            "/api/reports",
            post(handlers::submit_report).get(handlers::list_reports),
        )
        .route("/api/reports/stats", get(handlers::get_stats))
        .route("/api/reports/{id}", get(handlers::get_report))
        .route("/api/reports/{id}/status", patch(handlers::advance_status))
        .route("/api/reports/{id}/officer", put(handlers::assign_officer))
        .route(
            "/api/reports/{id}/resolution",
            put(handlers::attach_resolution),
        )
        .with_state(state)
}
