use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::detection::{DetectionClass, SeverityLevel};
use super::video::{UserId, VideoId};

/// Detection counts per severity level. Every level is always present,
/// defaulting to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
    pub critical: u64,
}

impl SeverityCounts {
    pub fn record(&mut self, level: SeverityLevel) {
        match level {
            SeverityLevel::Low => self.low += 1,
            SeverityLevel::Medium => self.medium += 1,
            SeverityLevel::High => self.high += 1,
            SeverityLevel::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.low + self.medium + self.high + self.critical
    }
}

/// Detection counts per damage class. Every class is always present,
/// defaulting to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub pothole: u64,
    pub crack: u64,
    pub other: u64,
}

impl ClassCounts {
    pub fn record(&mut self, class: DetectionClass) {
        match class {
            DetectionClass::Pothole => self.pothole += 1,
            DetectionClass::Crack => self.crack += 1,
            DetectionClass::Other => self.other += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.pothole + self.crack + self.other
    }
}

/// Aggregated figures for one video's detection set.
///
/// The `route_*` fields are the corners of the bounding extent (min/max of
/// all detection coordinates), not actual path endpoints. The names are
/// kept for report compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_detections: u64,
    pub by_severity: SeverityCounts,
    pub by_class: ClassCounts,
    pub route_start_lat: f64,
    pub route_start_lng: f64,
    pub route_end_lat: f64,
    pub route_end_lng: f64,
}

/// An inspection report, derived on demand from a video's detection set.
///
/// Never persisted; regenerated each time it is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,

    pub video_id: VideoId,

    pub user_id: UserId,

    pub inspector_name: String,

    pub organization: String,

    pub created_at: DateTime<Utc>,

    pub summary: ReportSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_counts_record() {
        let mut counts = SeverityCounts::default();
        counts.record(SeverityLevel::High);
        counts.record(SeverityLevel::High);
        counts.record(SeverityLevel::Critical);

        assert_eq!(counts.high, 2);
        assert_eq!(counts.critical, 1);
        assert_eq!(counts.low, 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_class_counts_record() {
        let mut counts = ClassCounts::default();
        counts.record(DetectionClass::Pothole);
        counts.record(DetectionClass::Other);

        assert_eq!(counts.pothole, 1);
        assert_eq!(counts.crack, 0);
        assert_eq!(counts.other, 1);
        assert_eq!(counts.total(), 2);
    }
}
