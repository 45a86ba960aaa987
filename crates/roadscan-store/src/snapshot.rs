//! Snapshot round-trip for the detection store.
//!
//! The whole store serializes to ordered entry lists so the round-trip is
//! deterministic. `save`/`load` push and pull the snapshot through the
//! local durability layer under a fixed key, logging failures instead of
//! propagating them: losing a snapshot write must never take down a
//! capture session.

use async_trait::async_trait;
use roadscan_core::error::Result;
use roadscan_core::models::{Detection, Video};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::ports::{InspectionStore, SnapshotStore};

/// Durability-layer key for the serialized store
pub const SNAPSHOT_KEY: &str = "detection_store";

/// Serializable form of the full store: both maps as ordered entry lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub detections: Vec<(String, Vec<Detection>)>,
    pub videos: Vec<(String, Video)>,
}

/// Serialize the store and write it to the durability layer.
///
/// Failures are logged and swallowed.
pub async fn save(store: &dyn InspectionStore, durability: &dyn SnapshotStore) {
    let snapshot = match store.snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "Failed to snapshot detection store");
            return;
        }
    };

    let encoded = match serde_json::to_string(&snapshot) {
        Ok(encoded) => encoded,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize detection store");
            return;
        }
    };

    if let Err(e) = durability.put(SNAPSHOT_KEY, &encoded).await {
        tracing::error!(error = %e, "Failed to save detection store");
    }
}

/// Read the durability layer and restore the store from it, if a snapshot
/// exists.
///
/// Failures are logged and swallowed; the store is left untouched.
pub async fn load(store: &dyn InspectionStore, durability: &dyn SnapshotStore) {
    let stored = match durability.get(SNAPSHOT_KEY).await {
        Ok(Some(stored)) => stored,
        Ok(None) => return,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read detection store snapshot");
            return;
        }
    };

    let snapshot: StoreSnapshot = match serde_json::from_str(&stored) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse detection store snapshot");
            return;
        }
    };

    if let Err(e) = store.restore(snapshot).await {
        tracing::error!(error = %e, "Failed to restore detection store");
    }
}

/// File-backed durability layer: one JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(key), value).await?;
        Ok(())
    }
}

/// In-memory durability layer for tests
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let blobs = self.blobs.read().unwrap();
        Ok(blobs.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<()> {
        let mut blobs = self.blobs.write().unwrap();
        blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryInspectionStore;
    use chrono::Utc;
    use roadscan_core::models::{
        BBox, DetectionClass, DetectionId, ProcessingStatus, SeverityLevel, UserId, VideoId,
    };

    fn test_detection(video_id: &str, frame_index: u64) -> Detection {
        let video_id = VideoId(video_id.to_string());
        Detection {
            id: DetectionId::for_frame_result(&video_id, frame_index, 0),
            video_id,
            frame_index,
            timestamp: Utc::now(),
            bbox: BBox { x: 1.0, y: 2.0, width: 30.0, height: 40.0 },
            class_label: DetectionClass::Crack,
            confidence: 0.42,
            severity_score: SeverityLevel::Low,
            latitude: -8.5,
            longitude: 115.0,
            frame_url: None,
            notes: Some("Detection confidence: 42.0%".to_string()),
            created_at: Utc::now(),
        }
    }

    fn test_video(id: &str) -> Video {
        let now = Utc::now();
        Video {
            id: VideoId(id.to_string()),
            user_id: UserId("u1".to_string()),
            original_filename: "inspection_2026-08-07.webm".to_string(),
            storage_url: format!("file:///{}", id),
            uploaded_at: now,
            start_time: now,
            end_time: now,
            processing_status: ProcessingStatus::Completed,
            total_frames: Some(4),
            processed_frames: Some(4),
            detection_count: Some(1),
        }
    }

    async fn populated_store() -> MemoryInspectionStore {
        let store = MemoryInspectionStore::new();
        store.create_video(test_video("v1")).await.unwrap();
        store.create_video(test_video("v2")).await.unwrap();
        store.add_detection(test_detection("v1", 0)).await.unwrap();
        store.add_detection(test_detection("v2", 0)).await.unwrap();
        store.add_detection(test_detection("v1", 1)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_snapshot_round_trip() {
        let store = populated_store().await;
        let snapshot = store.snapshot().await.unwrap();

        let restored = MemoryInspectionStore::new();
        restored.restore(snapshot).await.unwrap();

        assert_eq!(
            restored.all_videos().await.unwrap(),
            store.all_videos().await.unwrap()
        );
        for id in ["v1", "v2"] {
            let id = VideoId(id.to_string());
            assert_eq!(
                restored.detections_by_video(&id).await.unwrap(),
                store.detections_by_video(&id).await.unwrap()
            );
        }
    }

    #[tokio::test]
    async fn test_snapshot_survives_json_encoding() {
        let store = populated_store().await;
        let snapshot = store.snapshot().await.unwrap();

        let encoded = serde_json::to_string(&snapshot).unwrap();
        let decoded: StoreSnapshot = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[tokio::test]
    async fn test_save_and_load_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let durability = FileSnapshotStore::new(dir.path());

        let store = populated_store().await;
        save(&store, &durability).await;

        let reloaded = MemoryInspectionStore::new();
        load(&reloaded, &durability).await;

        assert_eq!(
            reloaded.all_videos().await.unwrap(),
            store.all_videos().await.unwrap()
        );
        assert_eq!(
            reloaded.all_detections().await.unwrap(),
            store.all_detections().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_load_with_no_snapshot_leaves_store_empty() {
        let dir = tempfile::tempdir().unwrap();
        let durability = FileSnapshotStore::new(dir.path());

        let store = MemoryInspectionStore::new();
        load(&store, &durability).await;

        assert!(store.all_videos().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_with_corrupt_snapshot_is_swallowed() {
        let durability = MemorySnapshotStore::new();
        durability.put(SNAPSHOT_KEY, "not json").await.unwrap();

        let store = populated_store().await;
        load(&store, &durability).await;

        // Store keeps its previous contents
        assert_eq!(store.all_videos().await.unwrap().len(), 2);
    }
}
