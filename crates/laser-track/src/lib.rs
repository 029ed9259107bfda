//! High-level facade crate for the `laser-track-*` workspace.
//!
//! Points a two-servo steerable laser at a target detected in a camera
//! feed: per-frame target localization, calibrated pixel→angle mapping and
//! a safety-governed command path to the actuator transport.
//!
//! ## Quickstart
//!
//! ```no_run
//! use laser_track::{Tracker, TrackerConfig, CalibrationBounds};
//! use laser_track::tracker::{FrameSource, NoInput, NullObserver};
//! use laser_track::RgbFrame;
//!
//! struct Camera;
//! impl FrameSource for Camera {
//!     fn grab(&mut self) -> Option<RgbFrame> {
//!         None // deliver frames from the capture device here
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrackerConfig::new(CalibrationBounds {
//!     x_min: 150, x_max: 80, y_min: 50, y_max: 125,
//! });
//! let mut tracker = Tracker::new(&config, Camera, NoInput);
//! let report = tracker.run(&mut NullObserver)?;
//! println!("sent {} commands", report.commands_sent);
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `laser_track::core`: frame/angle types, calibration mapper, config.
//! - `laser_track::detect`: the target locator (brightness and color modes).
//! - `laser_track::servo`: safety governor, wire protocol, channels.
//! - `laser_track::tracker`: the control loop and its collaborator traits.
//! - `laser_track::interop` (feature `image`): `image` crate conversions.

pub use laser_track_core as core;
pub use laser_track_detect as detect;
pub use laser_track_servo as servo;

pub use laser_track_core::{
    map_pixel_to_angles, ActuatorAngles, CalibrationBounds, DetectionMode, PixelCoord, RgbFrame,
    RgbFrameView, SafetyLimits, TrackerConfig,
};
pub use laser_track_detect::{Locator, LocatorParams};
pub use laser_track_servo::{ActuationChannel, SafetyGovernor, SimulatedChannel};

pub mod tracker;
pub use tracker::{OperatorCommand, Tracker, TrackerError, TrackerReport};

#[cfg(feature = "image")]
pub mod interop;
