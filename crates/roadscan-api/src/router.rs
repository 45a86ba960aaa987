use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))

        // Videos
        .route("/api/v1/videos", get(handlers::list_videos))
        .route("/api/v1/videos", post(handlers::create_video))
        .route("/api/v1/videos/{video_id}", get(handlers::get_video))
        .route("/api/v1/videos/{video_id}", delete(handlers::delete_video))
        .route("/api/v1/videos/{video_id}/status", put(handlers::update_video_status))

        // Detections
        .route("/api/v1/videos/{video_id}/detections", get(handlers::list_detections_for_video))

        // Reports
        .route("/api/v1/videos/{video_id}/report", get(handlers::video_report))

        .with_state(state)
}
