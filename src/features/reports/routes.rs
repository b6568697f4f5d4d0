use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Create routes for the reports feature (all require auth middleware)
pub fn routes(report_service: Arc<ReportService>) -> Router {
    Router::new()
        .route("/api/reports", post(handlers::create_report))
        .route("/api/reports/{id}", get(handlers::get_report))
        .route("/api/reports/{id}/templates", post(handlers::upload_template))
        .route(
            "/api/reports/{id}/references",
            post(handlers::upload_reference),
        )
        .route(
            "/api/programs/{id}/reports",
            get(handlers::list_program_reports),
        )
        .route(
            "/api/programs/{id}/reports/created",
            get(handlers::list_created_reports),
        )
        .with_state(report_service)
}
