//! Core types and utilities for the laser tracker.
//!
//! This crate is intentionally small and free of image-processing and
//! hardware dependencies: frame buffers, pixel and actuator-angle types,
//! the calibrated pixel→angle mapping and the tracker configuration.

mod angles;
mod calib;
mod config;
mod error;
mod frame;
mod logger;
mod mode;

pub use angles::{ActuatorAngles, SafetyLimits};
pub use calib::{map_pixel_to_angles, CalibrationBounds};
pub use config::TrackerConfig;
pub use error::ConfigError;
pub use frame::{PixelCoord, RgbFrame, RgbFrameView};
pub use logger::init_with_level;
pub use mode::DetectionMode;
