use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Detection algorithm variant used by the target locator.
///
/// The color variants select an HSV band; the band parameters themselves
/// live with the locator so they stay data, not behavior.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Brightest spot after smoothing.
    #[default]
    Brightness,
    Red,
    Green,
    Blue,
}

impl DetectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMode::Brightness => "brightness",
            DetectionMode::Red => "red",
            DetectionMode::Green => "green",
            DetectionMode::Blue => "blue",
        }
    }
}

impl FromStr for DetectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brightness" | "bright" => Ok(DetectionMode::Brightness),
            "red" => Ok(DetectionMode::Red),
            "green" => Ok(DetectionMode::Green),
            "blue" => Ok(DetectionMode::Blue),
            other => Err(format!("unknown detection mode `{other}`")),
        }
    }
}
