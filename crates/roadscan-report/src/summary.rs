use chrono::Utc;
use roadscan_core::error::Result;
use roadscan_core::models::{ClassCounts, Report, ReportSummary, SeverityCounts, VideoId};
use roadscan_store::InspectionStore;
use std::sync::Arc;

/// Generates reports on demand from the detection store.
///
/// Reports are never persisted; each request recomputes from the current
/// detection set.
pub struct ReportGenerator {
    store: Arc<dyn InspectionStore>,
    inspector_name: String,
    organization: String,
}

impl ReportGenerator {
    pub fn new(
        store: Arc<dyn InspectionStore>,
        inspector_name: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            store,
            inspector_name: inspector_name.into(),
            organization: organization.into(),
        }
    }

    /// Reduce a video's detection set into a report.
    ///
    /// Returns `None` when the video is unknown or has no detections;
    /// "nothing to show" is the caller's decision, not an error. The
    /// reduction is a single pass and order-independent.
    ///
    /// The `route_start_*`/`route_end_*` fields carry the min/max corners
    /// of the bounding extent over all detection coordinates. They are
    /// not the endpoints of the driven path, despite the names.
    pub async fn summarize(&self, video_id: &VideoId) -> Result<Option<Report>> {
        let Some(video) = self.store.video(video_id).await? else {
            return Ok(None);
        };

        let detections = self.store.detections_by_video(video_id).await?;
        if detections.is_empty() {
            return Ok(None);
        }

        let mut by_severity = SeverityCounts::default();
        let mut by_class = ClassCounts::default();
        let (mut min_lat, mut max_lat) = (90.0_f64, -90.0_f64);
        let (mut min_lng, mut max_lng) = (180.0_f64, -180.0_f64);

        for detection in &detections {
            by_severity.record(detection.severity_score);
            by_class.record(detection.class_label);
            min_lat = min_lat.min(detection.latitude);
            max_lat = max_lat.max(detection.latitude);
            min_lng = min_lng.min(detection.longitude);
            max_lng = max_lng.max(detection.longitude);
        }

        Ok(Some(Report {
            id: format!("report-{}", video_id),
            video_id: video_id.clone(),
            user_id: video.user_id,
            inspector_name: self.inspector_name.clone(),
            organization: self.organization.clone(),
            created_at: Utc::now(),
            summary: ReportSummary {
                total_detections: detections.len() as u64,
                by_severity,
                by_class,
                route_start_lat: min_lat,
                route_start_lng: min_lng,
                route_end_lat: max_lat,
                route_end_lng: max_lng,
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use roadscan_core::models::{
        BBox, Detection, DetectionClass, DetectionId, ProcessingStatus, SeverityLevel, UserId,
        Video,
    };
    use roadscan_store::MemoryInspectionStore;

    fn test_video(id: &str) -> Video {
        let now = Utc::now();
        Video {
            id: VideoId(id.to_string()),
            user_id: UserId("u1".to_string()),
            original_filename: format!("{}.webm", id),
            storage_url: format!("blob:{}", id),
            uploaded_at: now,
            start_time: now,
            end_time: now,
            processing_status: ProcessingStatus::Completed,
            total_frames: Some(5),
            processed_frames: Some(5),
            detection_count: None,
        }
    }

    fn test_detection(
        video_id: &str,
        frame_index: u64,
        severity: SeverityLevel,
        class: DetectionClass,
        latitude: f64,
        longitude: f64,
    ) -> Detection {
        let video_id = VideoId(video_id.to_string());
        Detection {
            id: DetectionId::for_frame_result(&video_id, frame_index, 0),
            video_id,
            frame_index,
            timestamp: Utc::now(),
            bbox: BBox { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
            class_label: class,
            confidence: 0.8,
            severity_score: severity,
            latitude,
            longitude,
            frame_url: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn generator(store: Arc<MemoryInspectionStore>) -> ReportGenerator {
        ReportGenerator::new(store, "Road Inspector", "Inspection System")
    }

    #[tokio::test]
    async fn test_unknown_video_yields_none() {
        let store = Arc::new(MemoryInspectionStore::new());
        let reports = generator(store);
        let report = reports.summarize(&VideoId("missing".to_string())).await.unwrap();
        assert!(report.is_none());
    }

    #[tokio::test]
    async fn test_video_without_detections_yields_none() {
        let store = Arc::new(MemoryInspectionStore::new());
        store.create_video(test_video("v1")).await.unwrap();

        let reports = generator(store);
        let report = reports.summarize(&VideoId("v1".to_string())).await.unwrap();
        assert!(report.is_none());
    }

    #[tokio::test]
    async fn test_severity_histogram() {
        let store = Arc::new(MemoryInspectionStore::new());
        store.create_video(test_video("v1")).await.unwrap();
        store
            .add_detections(vec![
                test_detection("v1", 0, SeverityLevel::High, DetectionClass::Pothole, 1.0, 1.0),
                test_detection("v1", 1, SeverityLevel::High, DetectionClass::Pothole, 1.0, 1.0),
                test_detection(
                    "v1",
                    2,
                    SeverityLevel::Critical,
                    DetectionClass::Crack,
                    1.0,
                    1.0,
                ),
            ])
            .await
            .unwrap();

        let reports = generator(store);
        let report = reports
            .summarize(&VideoId("v1".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.summary.total_detections, 3);
        assert_eq!(
            report.summary.by_severity,
            SeverityCounts { low: 0, medium: 0, high: 2, critical: 1 }
        );
        assert_eq!(
            report.summary.by_class,
            ClassCounts { pothole: 2, crack: 1, other: 0 }
        );
    }

    #[tokio::test]
    async fn test_bounding_extent() {
        let store = Arc::new(MemoryInspectionStore::new());
        store.create_video(test_video("v1")).await.unwrap();
        store
            .add_detections(vec![
                test_detection("v1", 0, SeverityLevel::Low, DetectionClass::Pothole, 40.2, -73.4),
                test_detection("v1", 1, SeverityLevel::Low, DetectionClass::Pothole, 40.7, -73.9),
                test_detection("v1", 2, SeverityLevel::Low, DetectionClass::Pothole, 40.5, -73.1),
            ])
            .await
            .unwrap();

        let reports = generator(store);
        let report = reports
            .summarize(&VideoId("v1".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.summary.route_start_lat, 40.2);
        assert_eq!(report.summary.route_start_lng, -73.9);
        assert_eq!(report.summary.route_end_lat, 40.7);
        assert_eq!(report.summary.route_end_lng, -73.1);
    }

    #[tokio::test]
    async fn test_report_identity_fields() {
        let store = Arc::new(MemoryInspectionStore::new());
        store.create_video(test_video("v1")).await.unwrap();
        store
            .add_detection(test_detection(
                "v1",
                0,
                SeverityLevel::Low,
                DetectionClass::Other,
                0.0,
                0.0,
            ))
            .await
            .unwrap();

        let reports = generator(store);
        let report = reports
            .summarize(&VideoId("v1".to_string()))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(report.id, "report-v1");
        assert_eq!(report.video_id.0, "v1");
        assert_eq!(report.user_id.0, "u1");
        assert_eq!(report.inspector_name, "Road Inspector");
        assert_eq!(report.organization, "Inspection System");
    }

    fn severity_strategy() -> impl Strategy<Value = SeverityLevel> {
        prop_oneof![
            Just(SeverityLevel::Low),
            Just(SeverityLevel::Medium),
            Just(SeverityLevel::High),
            Just(SeverityLevel::Critical),
        ]
    }

    fn class_strategy() -> impl Strategy<Value = DetectionClass> {
        prop_oneof![
            Just(DetectionClass::Pothole),
            Just(DetectionClass::Crack),
            Just(DetectionClass::Other),
        ]
    }

    proptest! {
        // Histogram totals always agree with the detection count
        #[test]
        fn prop_totals_agree(entries in prop::collection::vec(
            (severity_strategy(), class_strategy(), -90.0_f64..90.0, -180.0_f64..180.0),
            1..40,
        )) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();

            runtime.block_on(async {
                let store = Arc::new(MemoryInspectionStore::new());
                store.create_video(test_video("v1")).await.unwrap();

                for (frame_index, (severity, class, lat, lng)) in entries.iter().enumerate() {
                    store
                        .add_detection(test_detection(
                            "v1",
                            frame_index as u64,
                            *severity,
                            *class,
                            *lat,
                            *lng,
                        ))
                        .await
                        .unwrap();
                }

                let reports = generator(store.clone());
                let report = reports
                    .summarize(&VideoId("v1".to_string()))
                    .await
                    .unwrap()
                    .unwrap();

                let count = store
                    .detections_by_video(&VideoId("v1".to_string()))
                    .await
                    .unwrap()
                    .len() as u64;

                prop_assert_eq!(report.summary.total_detections, count);
                prop_assert_eq!(report.summary.by_severity.total(), count);
                prop_assert_eq!(report.summary.by_class.total(), count);

                prop_assert!(report.summary.route_start_lat <= report.summary.route_end_lat);
                prop_assert!(report.summary.route_start_lng <= report.summary.route_end_lng);
                Ok(())
            })?;
        }
    }
}
