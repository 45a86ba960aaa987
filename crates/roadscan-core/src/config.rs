use crate::error::{Result, RoadscanError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for roadscan
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Base URL of the detection backend
    pub backend_url: ConfigValue<String>,
    /// GPS sampling interval in milliseconds
    pub gps_interval_ms: ConfigValue<u64>,
    /// Frame sampling interval in milliseconds
    pub frame_interval_ms: ConfigValue<u64>,
    /// Lossy encoding quality for sampled frames, in [0, 1]
    pub jpeg_quality: ConfigValue<f64>,
    /// Whether inference results completing after stop() are kept
    pub accept_late_detections: ConfigValue<bool>,
    /// Inspector name stamped on generated reports
    pub inspector_name: ConfigValue<String>,
    /// Organization stamped on generated reports
    pub organization: ConfigValue<String>,
    /// Directory for the local durability layer
    pub data_dir: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            backend_url: ConfigValue::new(
                "http://localhost:8000".to_string(),
                ConfigSource::Default,
            ),
            gps_interval_ms: ConfigValue::new(1000, ConfigSource::Default),
            frame_interval_ms: ConfigValue::new(3000, ConfigSource::Default),
            jpeg_quality: ConfigValue::new(0.8, ConfigSource::Default),
            accept_late_detections: ConfigValue::new(false, ConfigSource::Default),
            inspector_name: ConfigValue::new("Road Inspector".to_string(), ConfigSource::Default),
            organization: ConfigValue::new("Inspection System".to_string(), ConfigSource::Default),
            data_dir: ConfigValue::new(".roadscan".to_string(), ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| RoadscanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| RoadscanError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        // Update values from file
        if let Some(backend_url) = file_config.backend_url {
            self.backend_url.update(backend_url, ConfigSource::File);
        }

        if let Some(gps_interval_ms) = file_config.gps_interval_ms {
            self.gps_interval_ms.update(gps_interval_ms, ConfigSource::File);
        }

        if let Some(frame_interval_ms) = file_config.frame_interval_ms {
            self.frame_interval_ms.update(frame_interval_ms, ConfigSource::File);
        }

        if let Some(jpeg_quality) = file_config.jpeg_quality {
            validate_quality(jpeg_quality)?;
            self.jpeg_quality.update(jpeg_quality, ConfigSource::File);
        }

        if let Some(accept_late) = file_config.accept_late_detections {
            self.accept_late_detections.update(accept_late, ConfigSource::File);
        }

        if let Some(inspector_name) = file_config.inspector_name {
            self.inspector_name.update(inspector_name, ConfigSource::File);
        }

        if let Some(organization) = file_config.organization {
            self.organization.update(organization, ConfigSource::File);
        }

        if let Some(data_dir) = file_config.data_dir {
            self.data_dir.update(data_dir, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        if let Ok(backend_url) = env::var("ROADSCAN_BACKEND_URL") {
            self.backend_url.update(backend_url, ConfigSource::Environment);
        }

        if let Ok(interval_str) = env::var("ROADSCAN_GPS_INTERVAL_MS") {
            match interval_str.parse::<u64>() {
                Ok(interval) => self.gps_interval_ms.update(interval, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid ROADSCAN_GPS_INTERVAL_MS value '{}': expected integer milliseconds",
                    interval_str
                ),
            }
        }

        if let Ok(interval_str) = env::var("ROADSCAN_FRAME_INTERVAL_MS") {
            match interval_str.parse::<u64>() {
                Ok(interval) => self.frame_interval_ms.update(interval, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid ROADSCAN_FRAME_INTERVAL_MS value '{}': expected integer milliseconds",
                    interval_str
                ),
            }
        }

        if let Ok(quality_str) = env::var("ROADSCAN_JPEG_QUALITY") {
            match quality_str.parse::<f64>().ok().filter(|q| (0.0..=1.0).contains(q)) {
                Some(quality) => self.jpeg_quality.update(quality, ConfigSource::Environment),
                None => tracing::warn!(
                    "Invalid ROADSCAN_JPEG_QUALITY value '{}': expected a number in [0, 1]",
                    quality_str
                ),
            }
        }

        if let Ok(accept_str) = env::var("ROADSCAN_ACCEPT_LATE_DETECTIONS") {
            match accept_str.parse::<bool>() {
                Ok(accept) => {
                    self.accept_late_detections.update(accept, ConfigSource::Environment)
                }
                Err(_) => tracing::warn!(
                    "Invalid ROADSCAN_ACCEPT_LATE_DETECTIONS value '{}': expected true or false",
                    accept_str
                ),
            }
        }

        if let Ok(inspector_name) = env::var("ROADSCAN_INSPECTOR_NAME") {
            self.inspector_name.update(inspector_name, ConfigSource::Environment);
        }

        if let Ok(organization) = env::var("ROADSCAN_ORGANIZATION") {
            self.organization.update(organization, ConfigSource::Environment);
        }

        if let Ok(data_dir) = env::var("ROADSCAN_DATA_DIR") {
            self.data_dir.update(data_dir, ConfigSource::Environment);
        }

        self
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "backend_url".to_string(),
            (self.backend_url.value.clone(), self.backend_url.source),
        );

        map.insert(
            "gps_interval_ms".to_string(),
            (self.gps_interval_ms.value.to_string(), self.gps_interval_ms.source),
        );

        map.insert(
            "frame_interval_ms".to_string(),
            (self.frame_interval_ms.value.to_string(), self.frame_interval_ms.source),
        );

        map.insert(
            "jpeg_quality".to_string(),
            (self.jpeg_quality.value.to_string(), self.jpeg_quality.source),
        );

        map.insert(
            "accept_late_detections".to_string(),
            (
                self.accept_late_detections.value.to_string(),
                self.accept_late_detections.source,
            ),
        );

        map.insert(
            "inspector_name".to_string(),
            (self.inspector_name.value.clone(), self.inspector_name.source),
        );

        map.insert(
            "organization".to_string(),
            (self.organization.value.clone(), self.organization.source),
        );

        map.insert(
            "data_dir".to_string(),
            (self.data_dir.value.clone(), self.data_dir.source),
        );

        map
    }
}

fn validate_quality(quality: f64) -> Result<()> {
    if (0.0..=1.0).contains(&quality) {
        Ok(())
    } else {
        Err(RoadscanError::ConfigInvalid {
            key: "jpeg_quality".to_string(),
            reason: format!("Invalid quality: {}. Use a value in [0, 1]", quality),
        })
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    backend_url: Option<String>,
    gps_interval_ms: Option<u64>,
    frame_interval_ms: Option<u64>,
    jpeg_quality: Option<f64>,
    accept_late_detections: Option<bool>,
    inspector_name: Option<String>,
    organization: Option<String>,
    data_dir: Option<String>,
}
