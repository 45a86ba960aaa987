//! Session-owned live buffers.
//!
//! One instance belongs to exactly one capture session. Samplers and
//! detached inference tasks share it through an `Arc`; lock sections are
//! short and never held across an await. Sealing the buffers marks the
//! session as no longer live: GPS points are always refused afterwards,
//! and late inference results are admitted only when the session was
//! configured to accept them.

use roadscan_core::models::{Detection, GpsPoint};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Debug)]
pub struct SessionBuffers {
    gps_points: Mutex<Vec<GpsPoint>>,
    detections: Mutex<Vec<Detection>>,
    frame_count: AtomicU64,
    sealed: AtomicBool,
    gps_locked: AtomicBool,
    accept_late_detections: bool,
}

impl SessionBuffers {
    pub fn new(accept_late_detections: bool) -> Self {
        Self {
            gps_points: Mutex::new(Vec::new()),
            detections: Mutex::new(Vec::new()),
            frame_count: AtomicU64::new(0),
            sealed: AtomicBool::new(false),
            gps_locked: AtomicBool::new(false),
            accept_late_detections,
        }
    }

    /// Discard all live data and counters
    pub fn reset(&self) {
        self.gps_points.lock().unwrap().clear();
        self.detections.lock().unwrap().clear();
        self.frame_count.store(0, Ordering::SeqCst);
        self.sealed.store(false, Ordering::SeqCst);
        self.gps_locked.store(false, Ordering::SeqCst);
    }

    /// Append a GPS point in acquisition order. Refused once sealed.
    pub fn push_gps_point(&self, point: GpsPoint) -> bool {
        if self.sealed.load(Ordering::SeqCst) {
            return false;
        }
        self.gps_points.lock().unwrap().push(point);
        true
    }

    /// Most recent GPS fix, if any has been acquired yet
    pub fn latest_fix(&self) -> Option<GpsPoint> {
        self.gps_points.lock().unwrap().last().cloned()
    }

    pub fn gps_point_count(&self) -> usize {
        self.gps_points.lock().unwrap().len()
    }

    pub fn set_gps_locked(&self, locked: bool) {
        self.gps_locked.store(locked, Ordering::SeqCst);
    }

    pub fn gps_locked(&self) -> bool {
        self.gps_locked.load(Ordering::SeqCst)
    }

    /// Allocate the next frame ordinal. Strictly increasing, one per
    /// sampler tick, whatever the inference outcome.
    pub fn next_frame_index(&self) -> u64 {
        self.frame_count.fetch_add(1, Ordering::SeqCst)
    }

    pub fn frames_processed(&self) -> u64 {
        self.frame_count.load(Ordering::SeqCst)
    }

    /// Append a frame's detections in result order.
    ///
    /// Returns whether the batch was admitted; the caller persists only
    /// admitted batches. Once sealed, batches are admitted only when the
    /// session accepts late arrivals.
    pub fn admit_detections(&self, detections: &[Detection]) -> bool {
        if self.sealed.load(Ordering::SeqCst) && !self.accept_late_detections {
            return false;
        }
        self.detections.lock().unwrap().extend(detections.iter().cloned());
        true
    }

    pub fn detection_count(&self) -> usize {
        self.detections.lock().unwrap().len()
    }

    /// Seal the buffers and take a snapshot of their contents
    pub fn seal(&self) -> (Vec<GpsPoint>, Vec<Detection>) {
        self.sealed.store(true, Ordering::SeqCst);
        let gps_points = self.gps_points.lock().unwrap().clone();
        let detections = self.detections.lock().unwrap().clone();
        (gps_points, detections)
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use roadscan_core::models::{
        BBox, DetectionClass, DetectionId, LocationFix, SeverityLevel, VideoId,
    };

    fn point() -> GpsPoint {
        GpsPoint::from_fix(VideoId("v1".to_string()), &LocationFix::new(40.0, -73.0))
    }

    fn detection(frame_index: u64) -> Detection {
        let video_id = VideoId("v1".to_string());
        Detection {
            id: DetectionId::for_frame_result(&video_id, frame_index, 0),
            video_id,
            frame_index,
            timestamp: Utc::now(),
            bbox: BBox { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
            class_label: DetectionClass::Pothole,
            confidence: 0.9,
            severity_score: SeverityLevel::High,
            latitude: 40.0,
            longitude: -73.0,
            frame_url: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_frame_indices_are_strictly_increasing() {
        let buffers = SessionBuffers::new(false);
        assert_eq!(buffers.next_frame_index(), 0);
        assert_eq!(buffers.next_frame_index(), 1);
        assert_eq!(buffers.next_frame_index(), 2);
        assert_eq!(buffers.frames_processed(), 3);
    }

    #[test]
    fn test_sealed_buffers_refuse_gps_points() {
        let buffers = SessionBuffers::new(false);
        assert!(buffers.push_gps_point(point()));
        buffers.seal();
        assert!(!buffers.push_gps_point(point()));
        assert_eq!(buffers.gps_point_count(), 1);
    }

    #[test]
    fn test_sealed_buffers_drop_late_detections_by_default() {
        let buffers = SessionBuffers::new(false);
        assert!(buffers.admit_detections(&[detection(0)]));
        buffers.seal();
        assert!(!buffers.admit_detections(&[detection(1)]));
        assert_eq!(buffers.detection_count(), 1);
    }

    #[test]
    fn test_sealed_buffers_keep_late_detections_when_configured() {
        let buffers = SessionBuffers::new(true);
        buffers.seal();
        assert!(buffers.admit_detections(&[detection(0)]));
        assert_eq!(buffers.detection_count(), 1);
    }

    #[test]
    fn test_seal_snapshots_contents() {
        let buffers = SessionBuffers::new(false);
        buffers.push_gps_point(point());
        buffers.admit_detections(&[detection(0), detection(1)]);

        let (gps_points, detections) = buffers.seal();
        assert_eq!(gps_points.len(), 1);
        assert_eq!(detections.len(), 2);
        assert!(buffers.is_sealed());
    }

    #[test]
    fn test_reset_discards_everything() {
        let buffers = SessionBuffers::new(false);
        buffers.push_gps_point(point());
        buffers.admit_detections(&[detection(0)]);
        buffers.next_frame_index();
        buffers.set_gps_locked(true);
        buffers.seal();

        buffers.reset();

        assert_eq!(buffers.gps_point_count(), 0);
        assert_eq!(buffers.detection_count(), 0);
        assert_eq!(buffers.frames_processed(), 0);
        assert!(!buffers.gps_locked());
        assert!(!buffers.is_sealed());
    }
}
