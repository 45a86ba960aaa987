//! Capture session state machine.
//!
//! One session drives the media recorder, GPS sampler, frame sampler, and
//! elapsed clock through `idle → recording → {paused ⇄ recording} →
//! stopped`. `stopped` is terminal; a new session is a new machine with a
//! fresh video id.

use chrono::Utc;
use roadscan_core::config::LayeredConfig;
use roadscan_core::error::{Result, RoadscanError};
use roadscan_core::models::{
    ProcessingStatus, SessionOutcome, SessionState, UserId, Video, VideoId,
};
use roadscan_inference::Detector;
use roadscan_store::{snapshot, InspectionStore, SnapshotStore};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::buffers::SessionBuffers;
use crate::frames::{FramePipeline, FrameSampler};
use crate::gps::GpsSampler;
use crate::ports::{FrameSource, LocationProvider, Recorder};

/// Capture tuning for one session
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub gps_interval: Duration,
    pub frame_interval: Duration,
    pub jpeg_quality: f64,
    pub accept_late_detections: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            gps_interval: Duration::from_millis(1000),
            frame_interval: Duration::from_millis(3000),
            jpeg_quality: 0.8,
            accept_late_detections: false,
        }
    }
}

impl CaptureConfig {
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            gps_interval: Duration::from_millis(config.gps_interval_ms.value),
            frame_interval: Duration::from_millis(config.frame_interval_ms.value),
            jpeg_quality: config.jpeg_quality.value,
            accept_late_detections: config.accept_late_detections.value,
        }
    }
}

/// One capture session.
///
/// Owns the live buffers and the device ports for its lifetime. The
/// detection store is shared: detections persist there as they are found,
/// and they stay persisted whatever happens to the session afterwards.
pub struct CaptureSession {
    state: SessionState,
    video_id: VideoId,
    config: CaptureConfig,
    buffers: Arc<SessionBuffers>,
    elapsed: Arc<AtomicU64>,
    recorder: Box<dyn Recorder>,
    location: Arc<dyn LocationProvider>,
    frames: Arc<dyn FrameSource>,
    detector: Arc<dyn Detector>,
    store: Arc<dyn InspectionStore>,
    gps_sampler: Option<GpsSampler>,
    frame_sampler: Option<FrameSampler>,
    clock: Option<ElapsedClock>,
}

impl CaptureSession {
    pub fn new(
        recorder: Box<dyn Recorder>,
        location: Arc<dyn LocationProvider>,
        frames: Arc<dyn FrameSource>,
        detector: Arc<dyn Detector>,
        store: Arc<dyn InspectionStore>,
        config: CaptureConfig,
    ) -> Self {
        let accept_late = config.accept_late_detections;
        Self {
            state: SessionState::Idle,
            video_id: VideoId::generate(),
            config,
            buffers: Arc::new(SessionBuffers::new(accept_late)),
            elapsed: Arc::new(AtomicU64::new(0)),
            recorder,
            location,
            frames,
            detector,
            store,
            gps_sampler: None,
            frame_sampler: None,
            clock: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    /// Whole seconds of recording time, excluding paused stretches
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    pub fn gps_locked(&self) -> bool {
        self.buffers.gps_locked()
    }

    pub fn gps_point_count(&self) -> usize {
        self.buffers.gps_point_count()
    }

    pub fn detection_count(&self) -> usize {
        self.buffers.detection_count()
    }

    pub fn frames_processed(&self) -> u64 {
        self.buffers.frames_processed()
    }

    /// Begin recording.
    ///
    /// Only valid from `idle`. Recorder initialization failure (camera or
    /// microphone permission) is returned to the caller and the machine
    /// stays `idle` with nothing started. The detector readiness probe is
    /// fired without being awaited; an unreachable backend only means
    /// frames yield zero detections.
    pub async fn start(&mut self) -> Result<()> {
        if self.state != SessionState::Idle {
            return Err(RoadscanError::InvalidTransition {
                action: "start",
                state: self.state,
            });
        }

        self.recorder.start().await?;

        self.buffers.reset();
        self.elapsed.store(0, Ordering::SeqCst);

        let detector = self.detector.clone();
        tokio::spawn(async move {
            detector.ensure_ready().await;
        });

        self.gps_sampler = Some(GpsSampler::spawn(
            self.location.clone(),
            self.buffers.clone(),
            self.video_id.clone(),
            self.config.gps_interval,
        ));

        self.frame_sampler = Some(FrameSampler::spawn(
            FramePipeline {
                source: self.frames.clone(),
                detector: self.detector.clone(),
                store: self.store.clone(),
                buffers: self.buffers.clone(),
                video_id: self.video_id.clone(),
                jpeg_quality: self.config.jpeg_quality,
            },
            self.config.frame_interval,
        ));

        self.clock = Some(ElapsedClock::spawn(self.elapsed.clone()));

        self.state = SessionState::Recording;
        tracing::info!(video_id = %self.video_id, "Capture session started");
        Ok(())
    }

    /// Suspend the recorder and the elapsed clock.
    ///
    /// GPS and frame sampling keep running while paused; only the
    /// recorded media and the visible timer stand still.
    pub async fn pause(&mut self) -> Result<()> {
        if self.state != SessionState::Recording {
            return Err(RoadscanError::InvalidTransition {
                action: "pause",
                state: self.state,
            });
        }

        self.recorder.pause().await?;
        if let Some(clock) = &self.clock {
            clock.pause();
        }

        self.state = SessionState::Paused;
        Ok(())
    }

    /// Resume the recorder and the elapsed clock
    pub async fn resume(&mut self) -> Result<()> {
        if self.state != SessionState::Paused {
            return Err(RoadscanError::InvalidTransition {
                action: "resume",
                state: self.state,
            });
        }

        self.recorder.resume().await?;
        if let Some(clock) = &self.clock {
            clock.resume();
        }

        self.state = SessionState::Recording;
        Ok(())
    }

    /// Stop the session and emit its outcome.
    ///
    /// Cancels future sampler and clock ticks, finishes the recorder for
    /// the final media blob, and seals the buffers. Inference calls still
    /// in flight are left to finish; their results are dropped unless the
    /// session was configured to accept late detections, in which case
    /// they still reach the store (the emitted outcome is already a
    /// sealed snapshot either way).
    pub async fn stop(&mut self) -> Result<SessionOutcome> {
        if self.state != SessionState::Recording && self.state != SessionState::Paused {
            return Err(RoadscanError::InvalidTransition {
                action: "stop",
                state: self.state,
            });
        }

        if let Some(sampler) = self.gps_sampler.take() {
            sampler.stop();
        }
        if let Some(sampler) = self.frame_sampler.take() {
            sampler.stop();
        }
        if let Some(clock) = self.clock.take() {
            clock.stop();
        }

        let blob = self.recorder.stop().await?;
        let (gps_points, detections) = self.buffers.seal();
        let frames_processed = self.buffers.frames_processed();

        self.state = SessionState::Stopped;
        tracing::info!(
            video_id = %self.video_id,
            gps_points = gps_points.len(),
            detections = detections.len(),
            frames_processed,
            "Capture session stopped"
        );

        Ok(SessionOutcome {
            blob,
            gps_points,
            detections,
            frames_processed,
        })
    }

    /// Finalize a stopped session into a video record.
    ///
    /// The record reuses the id every buffered detection already carries,
    /// is marked completed immediately, and the store snapshot is written
    /// to the durability layer.
    pub async fn finalize(
        &self,
        outcome: &SessionOutcome,
        user_id: UserId,
        storage_url: impl Into<String> + Send,
        durability: &dyn SnapshotStore,
    ) -> Result<Video> {
        if self.state != SessionState::Stopped {
            return Err(RoadscanError::InvalidTransition {
                action: "finalize",
                state: self.state,
            });
        }

        let now = Utc::now();
        let track_seconds = outcome.gps_points.len();

        let video = Video {
            id: self.video_id.clone(),
            user_id,
            original_filename: format!("inspection_{}.webm", now.format("%Y-%m-%d")),
            storage_url: storage_url.into(),
            uploaded_at: now,
            // One GPS point per second of track
            start_time: now - chrono::Duration::seconds(track_seconds as i64),
            end_time: now,
            processing_status: ProcessingStatus::Completed,
            total_frames: Some(track_seconds as u64),
            processed_frames: Some(track_seconds as u64),
            detection_count: Some(outcome.detections.len() as u64),
        };

        self.store.create_video(video.clone()).await?;
        snapshot::save(self.store.as_ref(), durability).await;

        tracing::info!(video_id = %video.id, detections = outcome.detections.len(), "Session finalized");
        Ok(video)
    }
}

/// 1-tick-per-second elapsed timer. Pausing skips ticks instead of
/// stopping them so resume stays aligned to the original cadence.
struct ElapsedClock {
    paused: Arc<AtomicBool>,
    cancel: CancellationToken,
}

impl ElapsedClock {
    fn spawn(seconds: Arc<AtomicU64>) -> Self {
        let paused = Arc::new(AtomicBool::new(false));
        let cancel = CancellationToken::new();
        let paused_flag = paused.clone();
        let token = cancel.clone();

        tokio::spawn(async move {
            let period = Duration::from_secs(1);
            let start = tokio::time::Instant::now() + period;
            let mut ticker = tokio::time::interval_at(start, period);

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {
                        if !paused_flag.load(Ordering::SeqCst) {
                            seconds.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                }
            }
        });

        Self { paused, cancel }
    }

    fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    fn stop(&self) {
        self.cancel.cancel();
    }
}

/// Format whole seconds as MM:SS for display
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
