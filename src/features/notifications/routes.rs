use std::sync::Arc;

use axum::{
    routing::{delete, get, patch},
    Router,
};

use crate::features::notifications::handlers;
use crate::features::notifications::services::NotificationService;

/// Create routes for the notifications feature (all require auth middleware)
pub fn routes(notification_service: Arc<NotificationService>) -> Router {
    Router::new()
        .route(
            "/api/notifications",
            get(handlers::list_notifications).delete(handlers::delete_all_notifications),
        )
        .route(
            "/api/notifications/read-all",
            patch(handlers::mark_all_as_read),
        )
        .route("/api/notifications/{id}/read", patch(handlers::mark_as_read))
        .route(
            "/api/notifications/{id}",
            delete(handlers::delete_notification),
        )
        .with_state(notification_service)
}
