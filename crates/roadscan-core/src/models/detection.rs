use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::video::VideoId;

/// Unique identifier for a detection.
///
/// Ids are deterministic, derived from the video, frame, and result index,
/// so re-materializing the same inference output yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectionId(pub String);

impl DetectionId {
    /// Build the id for result `result_index` of frame `frame_index`
    pub fn for_frame_result(video_id: &VideoId, frame_index: u64, result_index: usize) -> Self {
        Self(format!("det-{}-{}-{}", video_id.0, frame_index, result_index))
    }
}

impl fmt::Display for DetectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Closed classification of detected road damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionClass {
    Pothole,
    Crack,
    Other,
}

/// Closed four-level ordinal severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Bounding box in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One instance of road damage identified in one frame.
///
/// Immutable once created. Owned by the detection store, keyed by
/// `video_id`; insertion order is discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: DetectionId,

    pub video_id: VideoId,

    /// Ordinal of the sampled frame this detection came from
    pub frame_index: u64,

    /// When the frame was sampled
    pub timestamp: DateTime<Utc>,

    pub bbox: BBox,

    pub class_label: DetectionClass,

    /// Model confidence in [0, 1]
    pub confidence: f64,

    pub severity_score: SeverityLevel,

    /// Latitude of the GPS fix paired with the frame (0.0 when no fix)
    pub latitude: f64,

    /// Longitude of the GPS fix paired with the frame (0.0 when no fix)
    pub longitude: f64,

    pub frame_url: Option<String>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}
