use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use roadscan_core::models::{Detection, VideoId};

use crate::error::ApiError;
use crate::state::AppState;

/// Detections for one video in discovery order. Unknown videos yield an
/// empty list rather than an error.
pub async fn list_detections_for_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Json<Vec<Detection>>, ApiError> {
    let detections = state
        .store
        .detections_by_video(&VideoId(video_id))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to list detections");
            ApiError::internal("Failed to list detections").with_details(e.to_string())
        })?;

    Ok(Json(detections))
}
