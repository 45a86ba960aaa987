//! Detector port definition

use async_trait::async_trait;
use roadscan_core::models::{BBox, DetectionClass, Frame, GpsPoint, SeverityLevel};
use serde::{Deserialize, Serialize};

/// One raw result returned by the detection service for a single frame.
///
/// Wire format is camelCase; class and severity are closed enums, so a
/// response carrying any other value fails to parse and counts as zero
/// detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub class_label: DetectionClass,
    pub confidence: f64,
    pub bbox: BBox,
    pub severity_score: SeverityLevel,
}

/// Port for frame inference.
///
/// Failures are contained inside the adapter: an unreachable or failing
/// service yields an empty result list, never an error, so sampling keeps
/// running.
#[async_trait]
pub trait Detector: Send + Sync {
    /// One-time idempotent readiness probe. Failure to reach the service
    /// is logged but does not block later submissions.
    async fn ensure_ready(&self);

    /// Submit one frame with its optional GPS fix; returns zero or more
    /// raw results
    async fn detect(&self, frame: &Frame, gps: Option<&GpsPoint>) -> Vec<DetectionResult>;
}
