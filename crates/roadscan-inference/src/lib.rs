//! Roadscan Inference - Client for the remote damage-detection service
//!
//! Defines the detector port, the HTTP adapter, and the pure
//! materialization of raw results into detection records.

pub mod http;
pub mod materialize;
pub mod ports;

// Re-export main types
pub use http::HttpDetector;
pub use materialize::materialize_detections;
pub use ports::{DetectionResult, Detector};
