//! Roadscan Capture - Live recording sessions
//!
//! Coordinates the media recorder, periodic GPS sampling, periodic frame
//! sampling, and remote inference into one capture session producing a
//! geotagged detection dataset.

pub mod buffers;
pub mod frames;
pub mod gps;
pub mod ports;
pub mod session;

pub use buffers::SessionBuffers;
pub use frames::FrameSampler;
pub use gps::GpsSampler;
pub use ports::{FrameSource, LocationProvider, LocationRequest, Recorder};
pub use session::{format_elapsed, CaptureConfig, CaptureSession};
