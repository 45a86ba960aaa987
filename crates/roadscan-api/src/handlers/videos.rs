use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use roadscan_core::models::{ProcessingStatus, UserId, Video, VideoId};
use roadscan_store::snapshot;

use crate::dto::{CreateVideoRequest, DeleteResponse, UpdateStatusRequest, VideoListQuery};
use crate::error::ApiError;
use crate::state::AppState;

pub async fn list_videos(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoListQuery>,
) -> Result<Json<Vec<Video>>, ApiError> {
    let videos = match query.user_id {
        Some(user_id) => state.store.videos_by_user(&UserId(user_id)).await,
        None => state.store.all_videos().await,
    }
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to list videos");
        ApiError::internal("Failed to list videos").with_details(e.to_string())
    })?;

    Ok(Json(videos))
}

pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Json<Video>, ApiError> {
    let video = state.store.video(&VideoId(video_id.clone())).await?;

    video
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Video not found: {}", video_id)))
}

pub async fn create_video(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<Video>), ApiError> {
    if request.user_id.is_empty() {
        return Err(ApiError::bad_request("user_id must not be empty"));
    }

    let now = Utc::now();
    let video = Video {
        id: request.id.map(VideoId).unwrap_or_else(VideoId::generate),
        user_id: UserId(request.user_id),
        original_filename: request.original_filename,
        storage_url: request.storage_url,
        uploaded_at: now,
        start_time: now,
        end_time: now,
        processing_status: ProcessingStatus::Pending,
        total_frames: request.total_frames,
        processed_frames: None,
        detection_count: None,
    };

    tracing::info!(video_id = %video.id, "Registering uploaded video");
    state.store.create_video(video.clone()).await?;
    snapshot::save(state.store.as_ref(), state.durability.as_ref()).await;

    Ok((StatusCode::CREATED, Json(video)))
}

pub async fn update_video_status(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Video>, ApiError> {
    let updated = state
        .store
        .update_video_status(&VideoId(video_id.clone()), request.status)
        .await?;

    let Some(video) = updated else {
        return Err(ApiError::not_found(format!("Video not found: {}", video_id)));
    };

    snapshot::save(state.store.as_ref(), state.durability.as_ref()).await;
    Ok(Json(video))
}

pub async fn delete_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = VideoId(video_id.clone());
    if state.store.video(&id).await?.is_none() {
        return Err(ApiError::not_found(format!("Video not found: {}", video_id)));
    }

    tracing::info!(video_id = %video_id, "Deleting video and its detections");
    state.store.delete_video(&id).await?;
    snapshot::save(state.store.as_ref(), state.durability.as_ref()).await;

    Ok(Json(DeleteResponse::deleted(&video_id)))
}
