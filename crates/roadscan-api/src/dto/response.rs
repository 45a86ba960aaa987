use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self { status: "ok", service: "roadscan-api" }
    }
}

/// Video deletion response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

impl DeleteResponse {
    pub fn deleted(video_id: &str) -> Self {
        Self {
            success: true,
            message: format!("Deleted video {} and its detections", video_id),
        }
    }
}
