use serde::{Deserialize, Serialize};
use std::fmt;

use super::detection::Detection;
use super::gps::GpsPoint;
use super::media::MediaBlob;

/// Lifecycle of a capture session.
///
/// `Stopped` is terminal; a new session is a new machine with a fresh
/// video id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Paused,
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SessionState::Idle => "idle",
            SessionState::Recording => "recording",
            SessionState::Paused => "paused",
            SessionState::Stopped => "stopped",
        };
        write!(f, "{}", label)
    }
}

/// Everything a finished session hands back to the caller.
///
/// Snapshot of the live buffers at the moment they were sealed; inference
/// results that complete later never appear here.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub blob: MediaBlob,
    pub gps_points: Vec<GpsPoint>,
    pub detections: Vec<Detection>,
    /// Number of frame sampler ticks the session performed
    pub frames_processed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Recording.to_string(), "recording");
        assert_eq!(SessionState::Paused.to_string(), "paused");
        assert_eq!(SessionState::Stopped.to_string(), "stopped");
    }
}
