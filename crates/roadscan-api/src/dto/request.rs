use roadscan_core::models::ProcessingStatus;
use serde::Deserialize;

/// Query parameters for the video listing
#[derive(Debug, Deserialize)]
pub struct VideoListQuery {
    /// Restrict the listing to one user's videos
    pub user_id: Option<String>,
}

/// Body for registering an uploaded video
#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    /// Client-chosen id; generated when absent
    pub id: Option<String>,
    pub user_id: String,
    pub original_filename: String,
    pub storage_url: String,
    pub total_frames: Option<u64>,
}

/// Body for a processing-status transition
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ProcessingStatus,
}
