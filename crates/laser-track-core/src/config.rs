use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::angles::SafetyLimits;
use crate::calib::CalibrationBounds;
use crate::error::ConfigError;
use crate::mode::DetectionMode;

/// Immutable tracker configuration, constructed once at startup and passed
/// by reference into the mapper and the safety governor.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Calibration endpoints from the interactive calibration procedure.
    pub calibration: CalibrationBounds,
    #[serde(default)]
    pub limits: SafetyLimits,
    /// Initial detection mode; switchable at runtime via operator input.
    #[serde(default)]
    pub mode: DetectionMode,
}

impl TrackerConfig {
    pub fn new(calibration: CalibrationBounds) -> Self {
        Self {
            calibration,
            limits: SafetyLimits::default(),
            mode: DetectionMode::default(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
