use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use roadscan_core::models::{Report, VideoId};

use crate::error::ApiError;
use crate::state::AppState;

/// Regenerate a video's report from its current detection set
pub async fn video_report(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Json<Report>, ApiError> {
    let report = state.reports.summarize(&VideoId(video_id.clone())).await?;

    report.map(Json).ok_or_else(|| {
        ApiError::not_found(format!("No report available for video: {}", video_id))
    })
}
