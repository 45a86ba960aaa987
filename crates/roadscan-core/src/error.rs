//! Error types for roadscan

use crate::models::SessionState;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoadscanError {
    // Device errors
    #[error("Recorder unavailable: {reason}")]
    RecorderUnavailable { reason: String },

    #[error("Location provider unavailable: {reason}")]
    LocationUnavailable { reason: String },

    #[error("Frame source unavailable: {reason}")]
    FrameUnavailable { reason: String },

    // Detection backend errors
    #[error("Detection backend unavailable: {reason}. Try: {remediation}")]
    BackendUnavailable {
        reason: String,
        remediation: String,
    },

    // Session errors
    #[error("Cannot {action} while session is {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, RoadscanError>;
