use serde::{Deserialize, Serialize};

/// A still frame snapshot taken from the live video source.
///
/// The source encodes at its native resolution; `data` already carries the
/// lossy-encoded image bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub data: Vec<u8>,
    pub mime_type: String,
    pub width: u32,
    pub height: u32,
}

impl Frame {
    pub fn jpeg(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            mime_type: "image/jpeg".to_string(),
            width,
            height,
        }
    }
}

/// The final recorded media emitted by the recorder when a session stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaBlob {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl MediaBlob {
    pub fn webm(data: Vec<u8>) -> Self {
        Self {
            data,
            mime_type: "video/webm".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
