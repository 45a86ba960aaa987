//! In-memory store adapter.
//!
//! This implementation uses `RwLock::unwrap()` intentionally. Lock
//! poisoning only occurs when another thread panicked while holding the
//! lock, which is an unrecoverable state. Insertion order is preserved for
//! both videos and per-video detection lists so that snapshots and
//! listings are deterministic.

use async_trait::async_trait;
use roadscan_core::error::Result;
use roadscan_core::models::{Detection, ProcessingStatus, UserId, Video, VideoId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ports::InspectionStore;
use crate::snapshot::StoreSnapshot;

/// In-memory implementation of InspectionStore
#[derive(Debug, Clone, Default)]
pub struct MemoryInspectionStore {
    detections: Arc<RwLock<HashMap<String, Vec<Detection>>>>,
    /// Video ids in the order their first detection arrived
    detection_order: Arc<RwLock<Vec<String>>>,
    /// Videos in creation order
    videos: Arc<RwLock<Vec<Video>>>,
}

impl MemoryInspectionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn push_detection(
        detections: &mut HashMap<String, Vec<Detection>>,
        order: &mut Vec<String>,
        detection: Detection,
    ) {
        let key = detection.video_id.0.clone();
        match detections.get_mut(&key) {
            Some(list) => list.push(detection),
            None => {
                order.push(key.clone());
                detections.insert(key, vec![detection]);
            }
        }
    }
}

#[async_trait]
impl InspectionStore for MemoryInspectionStore {
    async fn add_detection(&self, detection: Detection) -> Result<()> {
        let mut detections = self.detections.write().unwrap();
        let mut order = self.detection_order.write().unwrap();
        Self::push_detection(&mut detections, &mut order, detection);
        Ok(())
    }

    async fn add_detections(&self, batch: Vec<Detection>) -> Result<()> {
        let mut detections = self.detections.write().unwrap();
        let mut order = self.detection_order.write().unwrap();
        for detection in batch {
            Self::push_detection(&mut detections, &mut order, detection);
        }
        Ok(())
    }

    async fn detections_by_video(&self, video_id: &VideoId) -> Result<Vec<Detection>> {
        let detections = self.detections.read().unwrap();
        Ok(detections.get(&video_id.0).cloned().unwrap_or_default())
    }

    async fn all_detections(&self) -> Result<Vec<Detection>> {
        let detections = self.detections.read().unwrap();
        let order = self.detection_order.read().unwrap();

        Ok(order
            .iter()
            .filter_map(|key| detections.get(key))
            .flat_map(|list| list.iter().cloned())
            .collect())
    }

    async fn clear_detections(&self, video_id: &VideoId) -> Result<()> {
        let mut detections = self.detections.write().unwrap();
        let mut order = self.detection_order.write().unwrap();
        detections.remove(&video_id.0);
        order.retain(|key| key != &video_id.0);
        Ok(())
    }

    async fn create_video(&self, video: Video) -> Result<()> {
        let mut videos = self.videos.write().unwrap();
        match videos.iter_mut().find(|v| v.id == video.id) {
            Some(existing) => *existing = video,
            None => videos.push(video),
        }
        Ok(())
    }

    async fn video(&self, id: &VideoId) -> Result<Option<Video>> {
        let videos = self.videos.read().unwrap();
        Ok(videos.iter().find(|v| &v.id == id).cloned())
    }

    async fn all_videos(&self) -> Result<Vec<Video>> {
        let videos = self.videos.read().unwrap();
        Ok(videos.clone())
    }

    async fn videos_by_user(&self, user_id: &UserId) -> Result<Vec<Video>> {
        let videos = self.videos.read().unwrap();
        Ok(videos.iter().filter(|v| &v.user_id == user_id).cloned().collect())
    }

    async fn update_video_status(
        &self,
        id: &VideoId,
        status: ProcessingStatus,
    ) -> Result<Option<Video>> {
        let detection_count = {
            let detections = self.detections.read().unwrap();
            detections.get(&id.0).map(|list| list.len() as u64).unwrap_or(0)
        };

        let mut videos = self.videos.write().unwrap();
        let Some(video) = videos.iter_mut().find(|v| &v.id == id) else {
            return Ok(None);
        };

        video.processing_status = status;
        if status == ProcessingStatus::Completed {
            video.processed_frames = video.total_frames;
            video.detection_count = Some(detection_count);
        } else {
            video.processed_frames = Some(0);
            video.detection_count = None;
        }

        Ok(Some(video.clone()))
    }

    async fn delete_video(&self, id: &VideoId) -> Result<()> {
        {
            let mut videos = self.videos.write().unwrap();
            videos.retain(|v| &v.id != id);
        }
        let mut detections = self.detections.write().unwrap();
        let mut order = self.detection_order.write().unwrap();
        detections.remove(&id.0);
        order.retain(|key| key != &id.0);
        Ok(())
    }

    async fn snapshot(&self) -> Result<StoreSnapshot> {
        let detections = self.detections.read().unwrap();
        let order = self.detection_order.read().unwrap();
        let videos = self.videos.read().unwrap();

        Ok(StoreSnapshot {
            detections: order
                .iter()
                .filter_map(|key| detections.get(key).map(|list| (key.clone(), list.clone())))
                .collect(),
            videos: videos.iter().map(|v| (v.id.0.clone(), v.clone())).collect(),
        })
    }

    async fn restore(&self, snapshot: StoreSnapshot) -> Result<()> {
        let mut detections = self.detections.write().unwrap();
        let mut order = self.detection_order.write().unwrap();
        let mut videos = self.videos.write().unwrap();

        *order = snapshot.detections.iter().map(|(key, _)| key.clone()).collect();
        *detections = snapshot.detections.into_iter().collect();
        *videos = snapshot.videos.into_iter().map(|(_, video)| video).collect();

        Ok(())
    }
}
