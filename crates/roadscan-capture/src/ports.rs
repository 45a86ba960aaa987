//! Device-facing port definitions

use async_trait::async_trait;
use roadscan_core::error::Result;
use roadscan_core::models::{Frame, LocationFix, MediaBlob};
use std::time::Duration;

/// Options for one position request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    /// Maximum age of a cached fix the provider may return
    pub max_cache_age: Duration,
    /// How long the provider may take before giving up
    pub timeout: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            max_cache_age: Duration::from_millis(1000),
            timeout: Duration::from_millis(5000),
        }
    }
}

/// Port for the device location provider
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Acquire the current position.
    ///
    /// Permission denial or timeout is an error the caller treats as
    /// non-fatal; the sampler retries on its next tick.
    async fn current_position(&self, request: &LocationRequest) -> Result<LocationFix>;
}

/// Port for the live video source
#[async_trait]
pub trait FrameSource: Send + Sync {
    /// Snapshot the current frame at the source's native resolution,
    /// lossy-encoded at the given quality in [0, 1]
    async fn capture_frame(&self, jpeg_quality: f64) -> Result<Frame>;
}

/// Port for the media recorder
#[async_trait]
pub trait Recorder: Send + Sync {
    /// Begin recording. Device permission failure surfaces here and
    /// blocks the session from starting.
    async fn start(&mut self) -> Result<()>;

    /// Suspend recording without finishing the media
    async fn pause(&mut self) -> Result<()>;

    /// Continue a paused recording
    async fn resume(&mut self) -> Result<()>;

    /// Finish recording and yield the final media blob
    async fn stop(&mut self) -> Result<MediaBlob>;
}
