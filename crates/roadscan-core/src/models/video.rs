use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a video
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(pub String);

impl VideoId {
    /// Allocate a fresh id for a new capture session
    pub fn generate() -> Self {
        Self(format!("video-{}", Uuid::new_v4()))
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for VideoId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque key partitioning videos per authenticated user.
///
/// Issued by the authentication service; the core never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Processing lifecycle of an inspection video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

/// One recorded or uploaded inspection video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,

    pub user_id: UserId,

    pub original_filename: String,

    pub storage_url: String,

    pub uploaded_at: DateTime<Utc>,

    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,

    pub processing_status: ProcessingStatus,

    pub total_frames: Option<u64>,

    /// Frames processed so far; equals `total_frames` once completed
    pub processed_frames: Option<u64>,

    /// Detection count frozen at the moment the status last became completed
    pub detection_count: Option<u64>,
}
