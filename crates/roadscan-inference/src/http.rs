use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use roadscan_core::models::{Frame, GpsPoint};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::ports::{DetectionResult, Detector};

/// HTTP adapter for the detection backend.
///
/// Degrades rather than fails: the readiness probe runs once and its
/// outcome is informational only, and any transport or decode error on a
/// submission yields an empty result list with no retry.
pub struct HttpDetector {
    /// Base URL for the detection backend (e.g., "http://localhost:8000")
    base_url: String,

    /// HTTP client
    client: reqwest::Client,

    /// One-shot readiness probe latch
    ready: OnceCell<()>,
}

impl HttpDetector {
    /// Create a new detector client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            ready: OnceCell::new(),
        }
    }

    /// Create with default localhost URL
    pub fn localhost() -> Self {
        Self::new("http://localhost:8000")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe the backend health endpoint
    pub async fn is_reachable(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl Detector for HttpDetector {
    async fn ensure_ready(&self) {
        self.ready
            .get_or_init(|| async {
                match self.client.get(format!("{}/health", self.base_url)).send().await {
                    Ok(response) if response.status().is_success() => {
                        tracing::info!("Detection backend is reachable");
                    }
                    Ok(response) => {
                        tracing::warn!(
                            status = %response.status(),
                            "Detection backend not reachable, will skip detections and return empty results"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            error = %e,
                            "Detection backend not reachable, will skip detections and return empty results"
                        );
                    }
                }
            })
            .await;
    }

    async fn detect(&self, frame: &Frame, gps: Option<&GpsPoint>) -> Vec<DetectionResult> {
        self.ensure_ready().await;

        let request = DetectRequest {
            image: encode_data_url(frame),
            gps: gps.map(|point| GpsCoordinates {
                latitude: point.latitude,
                longitude: point.longitude,
            }),
        };

        let response = match self
            .client
            .post(format!("{}/detect", self.base_url))
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Detection request failed");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Detection backend error");
            return Vec::new();
        }

        match response.json::<DetectResponse>().await {
            Ok(body) => body.detections,
            Err(e) => {
                tracing::error!(error = %e, "Failed to parse detection response");
                Vec::new()
            }
        }
    }
}

/// Encode a frame as a data URL for the JSON payload
fn encode_data_url(frame: &Frame) -> String {
    format!("data:{};base64,{}", frame.mime_type, STANDARD.encode(&frame.data))
}

/// Request body for the detect endpoint
#[derive(Debug, Serialize)]
struct DetectRequest {
    image: String,
    gps: Option<GpsCoordinates>,
}

#[derive(Debug, Serialize)]
struct GpsCoordinates {
    latitude: f64,
    longitude: f64,
}

/// Response from the detect endpoint
#[derive(Debug, Deserialize)]
struct DetectResponse {
    #[serde(default)]
    detections: Vec<DetectionResult>,
}
