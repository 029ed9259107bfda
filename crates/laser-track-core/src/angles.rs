use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Absolute angle command for the two actuator axes, in degree units.
///
/// Nominally within [0, 180]; values outside the safe range may exist
/// transiently between the mapper and the safety governor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuatorAngles {
    pub x: i32,
    pub y: i32,
}

impl ActuatorAngles {
    /// Centered mount position, the pre-command default.
    pub const CENTER: Self = Self { x: 90, y: 90 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Hard limits enforced by the safety governor.
///
/// `safe_min`/`safe_max` are a numerically ordered pair, unlike the
/// directional calibration endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyLimits {
    /// Absolute minimum angle on either axis.
    pub safe_min: i32,
    /// Absolute maximum angle on either axis.
    pub safe_max: i32,
    /// Maximum per-axis change per accepted command, degrees.
    pub max_step: i32,
    /// Minimum interval between accepted commands, milliseconds.
    pub min_move_delay_ms: u64,
}

impl SafetyLimits {
    pub fn min_move_delay(&self) -> Duration {
        Duration::from_millis(self.min_move_delay_ms)
    }
}

impl Default for SafetyLimits {
    fn default() -> Self {
        Self {
            safe_min: 10,
            safe_max: 170,
            max_step: 20,
            min_move_delay_ms: 50,
        }
    }
}
