use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::programs::handlers;
use crate::features::programs::services::ProgramService;

/// Create routes for the programs feature (all require auth middleware)
pub fn routes(program_service: Arc<ProgramService>) -> Router {
    Router::new()
        .route(
            "/api/programs",
            post(handlers::create_program).get(handlers::list_programs),
        )
        .route("/api/programs/mine", get(handlers::list_my_programs))
        .with_state(program_service)
}
