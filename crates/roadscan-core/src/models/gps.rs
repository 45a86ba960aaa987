use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::video::VideoId;

/// A raw position reading from the location provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal accuracy in meters, when the provider reports it
    pub accuracy: Option<f64>,
    /// Ground speed in m/s, when the provider reports it
    pub speed: Option<f64>,
    /// Heading in degrees clockwise from north, when the provider reports it
    pub heading: Option<f64>,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            speed: None,
            heading: None,
        }
    }
}

/// One sample of the recording vehicle's position.
///
/// Created once per successful sampler tick while a session is active and
/// immutable afterwards. Points are buffered in session memory in
/// acquisition order; they travel with the finalized session outcome and
/// are not persisted on their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpsPoint {
    pub id: String,

    pub video_id: VideoId,

    pub timestamp: DateTime<Utc>,

    pub latitude: f64,

    pub longitude: f64,

    pub speed: Option<f64>,

    pub heading: Option<f64>,
}

impl GpsPoint {
    /// Stamp a provider fix into a session-owned point
    pub fn from_fix(video_id: VideoId, fix: &LocationFix) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            video_id,
            timestamp: Utc::now(),
            latitude: fix.latitude,
            longitude: fix.longitude,
            speed: fix.speed,
            heading: fix.heading,
        }
    }
}
