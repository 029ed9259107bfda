//! Target locator for the laser tracker.
//!
//! Given one frame and a detection mode, returns zero or one target pixel.
//! Brightness mode finds the global maximum of a smoothed intensity image;
//! color modes segment an HSV band, label connected regions and return the
//! area centroid of the largest one above a minimum size.

mod brightness;
mod hsv;
mod locator;
mod regions;

pub use brightness::{box_blur, luma};
pub use hsv::{rgb_to_hsv, ColorBand};
pub use locator::{DetectError, Locator, LocatorParams};
pub use regions::{largest_region, Region};
