//! Periodic frame sampling and inference submission.
//!
//! Each tick allocates the next frame ordinal and hands the rest of the
//! work to a detached task: capture, pair with the latest GPS fix, submit
//! to the detector, materialize, and record. Ticks are independent; a
//! slow inference call for one frame never delays the next capture, and
//! no queueing or backpressure is applied. Because of that, a later
//! frame's detections may land in the buffers before an earlier frame's.

use chrono::Utc;
use roadscan_core::models::VideoId;
use roadscan_inference::{materialize_detections, Detector};
use roadscan_store::InspectionStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::buffers::SessionBuffers;
use crate::ports::FrameSource;

/// Everything one frame's processing needs
#[derive(Clone)]
pub(crate) struct FramePipeline {
    pub source: Arc<dyn FrameSource>,
    pub detector: Arc<dyn Detector>,
    pub store: Arc<dyn InspectionStore>,
    pub buffers: Arc<SessionBuffers>,
    pub video_id: VideoId,
    pub jpeg_quality: f64,
}

/// Handle to a running frame sampling task
pub struct FrameSampler {
    cancel: CancellationToken,
}

impl FrameSampler {
    /// Spawn the sampling loop. The first capture happens one full
    /// interval after start.
    pub(crate) fn spawn(pipeline: FramePipeline, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let start = tokio::time::Instant::now() + interval;
            let mut ticker = tokio::time::interval_at(start, interval);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("Frame sampler cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let frame_index = pipeline.buffers.next_frame_index();
                        let pipeline = pipeline.clone();

                        tokio::spawn(async move {
                            process_frame(pipeline, frame_index).await;
                        });
                    }
                }
            }
        });

        Self { cancel }
    }

    /// Cancel future ticks
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Capture one frame, run inference, and record any detections
async fn process_frame(pipeline: FramePipeline, frame_index: u64) {
    let frame = match pipeline.source.capture_frame(pipeline.jpeg_quality).await {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(frame_index, error = %e, "Frame capture failed");
            return;
        }
    };

    let gps = pipeline.buffers.latest_fix();
    let results = pipeline.detector.detect(&frame, gps.as_ref()).await;
    if results.is_empty() {
        return;
    }

    let detections = materialize_detections(
        &results,
        &pipeline.video_id,
        frame_index,
        Utc::now(),
        gps.as_ref(),
    );

    if !pipeline.buffers.admit_detections(&detections) {
        tracing::debug!(frame_index, "Dropping detections that completed after stop");
        return;
    }

    let count = detections.len();
    if let Err(e) = pipeline.store.add_detections(detections).await {
        tracing::error!(frame_index, error = %e, "Failed to store detections");
        return;
    }

    tracing::debug!(frame_index, count, "Detections recorded");
}
