//! Materialization of raw inference results into detection records

use chrono::{DateTime, Utc};
use roadscan_core::models::{Detection, DetectionId, GpsPoint, VideoId};

use crate::ports::DetectionResult;

/// Turn the raw results for one frame into detection records.
///
/// Pure mapping: the same inputs always yield the same detection set.
/// Ids derive from `(video_id, frame_index, result_index)`, coordinates
/// come from the supplied fix (0, 0 when absent), and only `created_at`
/// is wall-clock.
pub fn materialize_detections(
    results: &[DetectionResult],
    video_id: &VideoId,
    frame_index: u64,
    timestamp: DateTime<Utc>,
    gps: Option<&GpsPoint>,
) -> Vec<Detection> {
    results
        .iter()
        .enumerate()
        .map(|(result_index, result)| Detection {
            id: DetectionId::for_frame_result(video_id, frame_index, result_index),
            video_id: video_id.clone(),
            frame_index,
            timestamp,
            bbox: result.bbox,
            class_label: result.class_label,
            confidence: result.confidence,
            severity_score: result.severity_score,
            latitude: gps.map(|point| point.latitude).unwrap_or(0.0),
            longitude: gps.map(|point| point.longitude).unwrap_or(0.0),
            frame_url: None,
            notes: Some(format!(
                "Detection confidence: {:.1}%",
                result.confidence * 100.0
            )),
            created_at: Utc::now(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadscan_core::models::{BBox, DetectionClass, LocationFix, SeverityLevel};

    fn raw_result(
        class_label: DetectionClass,
        confidence: f64,
        bbox: BBox,
        severity_score: SeverityLevel,
    ) -> DetectionResult {
        DetectionResult { class_label, confidence, bbox, severity_score }
    }

    #[test]
    fn test_two_results_with_fix() {
        let video_id = VideoId("v1".to_string());
        let fix = LocationFix::new(40.0, -73.0);
        let gps = GpsPoint::from_fix(video_id.clone(), &fix);
        let results = vec![
            raw_result(
                DetectionClass::Pothole,
                0.9,
                BBox { x: 10.0, y: 20.0, width: 100.0, height: 80.0 },
                SeverityLevel::High,
            ),
            raw_result(
                DetectionClass::Crack,
                0.4,
                BBox { x: 200.0, y: 30.0, width: 60.0, height: 12.0 },
                SeverityLevel::Low,
            ),
        ];

        let detections =
            materialize_detections(&results, &video_id, 0, Utc::now(), Some(&gps));

        assert_eq!(detections.len(), 2);
        assert_eq!(detections[0].id.to_string(), "det-v1-0-0");
        assert_eq!(detections[1].id.to_string(), "det-v1-0-1");
        for detection in &detections {
            assert_eq!(detection.latitude, 40.0);
            assert_eq!(detection.longitude, -73.0);
        }
        assert_eq!(detections[0].class_label, DetectionClass::Pothole);
        assert_eq!(detections[0].severity_score, SeverityLevel::High);
        assert_eq!(detections[1].class_label, DetectionClass::Crack);
        assert_eq!(detections[1].severity_score, SeverityLevel::Low);
    }

    #[test]
    fn test_materialize_is_deterministic() {
        let video_id = VideoId("v1".to_string());
        let timestamp = Utc::now();
        let results = vec![raw_result(
            DetectionClass::Other,
            0.777,
            BBox { x: 5.0, y: 6.0, width: 7.0, height: 8.0 },
            SeverityLevel::Medium,
        )];

        let first = materialize_detections(&results, &video_id, 3, timestamp, None);
        let second = materialize_detections(&results, &video_id, 3, timestamp, None);

        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[0].bbox, second[0].bbox);
        assert_eq!(first[0].class_label, second[0].class_label);
        assert_eq!(first[0].confidence, second[0].confidence);
        assert_eq!(first[0].severity_score, second[0].severity_score);
        assert_eq!(first[0].latitude, second[0].latitude);
        assert_eq!(first[0].longitude, second[0].longitude);
        assert_eq!(first[0].notes, second[0].notes);
    }

    #[test]
    fn test_missing_fix_defaults_to_origin() {
        let video_id = VideoId("v1".to_string());
        let results = vec![raw_result(
            DetectionClass::Pothole,
            0.5,
            BBox { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
            SeverityLevel::Low,
        )];

        let detections = materialize_detections(&results, &video_id, 0, Utc::now(), None);
        assert_eq!(detections[0].latitude, 0.0);
        assert_eq!(detections[0].longitude, 0.0);
    }

    #[test]
    fn test_note_embeds_confidence_percentage() {
        let video_id = VideoId("v1".to_string());
        let results = vec![raw_result(
            DetectionClass::Crack,
            0.425,
            BBox { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
            SeverityLevel::Low,
        )];

        let detections = materialize_detections(&results, &video_id, 0, Utc::now(), None);
        assert_eq!(
            detections[0].notes.as_deref(),
            Some("Detection confidence: 42.5%")
        );
    }

    #[test]
    fn test_empty_results_yield_no_detections() {
        let video_id = VideoId("v1".to_string());
        let detections = materialize_detections(&[], &video_id, 9, Utc::now(), None);
        assert!(detections.is_empty());
    }
}
