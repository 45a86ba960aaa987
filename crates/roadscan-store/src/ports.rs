use async_trait::async_trait;
use roadscan_core::error::Result;
use roadscan_core::models::{Detection, ProcessingStatus, UserId, Video, VideoId};

use crate::snapshot::StoreSnapshot;

/// Port for the detection store.
///
/// A keyed collection of detections and videos with a single-writer
/// assumption: all mutation goes through one cooperative runtime, so
/// adapters need no cross-operation locking.
#[async_trait]
pub trait InspectionStore: Send + Sync {
    /// Append one detection to its video's list. Never deduplicates and
    /// never checks that the video exists.
    async fn add_detection(&self, detection: Detection) -> Result<()>;

    /// Append a batch of detections in order
    async fn add_detections(&self, detections: Vec<Detection>) -> Result<()>;

    /// Detections for a video in insertion order; empty for unknown ids
    async fn detections_by_video(&self, video_id: &VideoId) -> Result<Vec<Detection>>;

    /// All detections across all videos
    async fn all_detections(&self) -> Result<Vec<Detection>>;

    /// Drop one video's detection list
    async fn clear_detections(&self, video_id: &VideoId) -> Result<()>;

    /// Store a new video record (replaces an existing record with the same id)
    async fn create_video(&self, video: Video) -> Result<()>;

    /// Retrieve a video by id
    async fn video(&self, id: &VideoId) -> Result<Option<Video>>;

    /// All videos in insertion order
    async fn all_videos(&self) -> Result<Vec<Video>>;

    /// Videos belonging to one user (linear filter)
    async fn videos_by_user(&self, user_id: &UserId) -> Result<Vec<Video>>;

    /// Transition a video's processing status.
    ///
    /// On `Completed`, freezes `processed_frames = total_frames` and
    /// `detection_count` to the current count for the video; any other
    /// status resets `processed_frames` to zero and clears
    /// `detection_count`. Unknown ids are a no-op returning `None`.
    async fn update_video_status(
        &self,
        id: &VideoId,
        status: ProcessingStatus,
    ) -> Result<Option<Video>>;

    /// Remove a video and all its detections
    async fn delete_video(&self, id: &VideoId) -> Result<()>;

    /// Capture the full store contents in a serializable form
    async fn snapshot(&self) -> Result<StoreSnapshot>;

    /// Replace the store contents from a snapshot
    async fn restore(&self, snapshot: StoreSnapshot) -> Result<()>;
}

/// Port for the local durability layer: a string-keyed blob store
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Read the blob stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write the blob stored under `key`
    async fn put(&self, key: &str, value: &str) -> Result<()>;
}
