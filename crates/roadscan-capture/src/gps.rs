//! Periodic GPS sampling.
//!
//! Runs as a background task ticking at the configured interval. Each
//! tick is fire-and-forget: the position request is dispatched without
//! blocking the next tick, and stopping the sampler cancels future ticks
//! but not requests already in flight (the sealed buffers refuse their
//! points instead).

use roadscan_core::models::{GpsPoint, VideoId};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::buffers::SessionBuffers;
use crate::ports::{LocationProvider, LocationRequest};

/// Handle to a running GPS sampling task
pub struct GpsSampler {
    cancel: CancellationToken,
}

impl GpsSampler {
    /// Spawn the sampling loop.
    ///
    /// The first position request fires immediately, then once per
    /// interval until [`stop`](Self::stop).
    pub fn spawn(
        provider: Arc<dyn LocationProvider>,
        buffers: Arc<SessionBuffers>,
        video_id: VideoId,
        interval: Duration,
    ) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("GPS sampler cancelled");
                        break;
                    }
                    _ = ticker.tick() => {
                        let provider = provider.clone();
                        let buffers = buffers.clone();
                        let video_id = video_id.clone();

                        tokio::spawn(async move {
                            sample_once(provider.as_ref(), &buffers, video_id).await;
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

/// One position request: append on success, flag unlocked on failure
async fn sample_once(
    provider: &dyn LocationProvider,
    buffers: &SessionBuffers,
    video_id: VideoId,
) {
    let request = LocationRequest::default();

    match provider.current_position(&request).await {
        Ok(fix) => {
            buffers.set_gps_locked(true);
            buffers.push_gps_point(GpsPoint::from_fix(video_id, &fix));
        }
        Err(e) => {
            buffers.set_gps_locked(false);
            tracing::warn!(error = %e, "GPS fix failed, retrying on next tick");
        }
    }
}
