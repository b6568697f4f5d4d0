use std::sync::Arc;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::features::submissions::handlers;
use crate::features::submissions::services::SubmissionService;

/// Create routes for the submissions feature (all require auth middleware)
pub fn routes(submission_service: Arc<SubmissionService>) -> Router {
    Router::new()
        .route("/api/report-submissions", post(handlers::create_submission))
        .route(
            "/api/report-submissions/mine",
            get(handlers::list_my_submissions),
        )
        .route(
            "/api/report-submissions/{id}",
            put(handlers::update_submission).patch(handlers::update_submission),
        )
        .route(
            "/api/report-submissions/{id}/status",
            patch(handlers::update_submission_status),
        )
        .route(
            "/api/report-submissions/{id}/attachments/{attachment_id}/download",
            get(handlers::download_attachment),
        )
        .route(
            "/api/reports/{id}/submissions",
            get(handlers::list_report_submissions),
        )
        .route(
            "/api/reports/{id}/my-submission",
            get(handlers::get_my_submission),
        )
        .with_state(submission_service)
}
