//! Safety governor and actuation channel for the laser tracker.
//!
//! Every command that reaches the physical mount passes through
//! [`SafetyGovernor::govern`]: rate limit, absolute clamp, per-command step
//! limit. The [`ActuationChannel`] trait abstracts the transport; a serial
//! implementation is behind the `serial` feature and a recording simulated
//! channel covers tests and hardware-free operation.

mod channel;
mod governor;
mod selftest;
mod wire;

#[cfg(feature = "serial")]
mod serial;

pub use channel::{ActuationChannel, ChannelError, SimulatedChannel};
pub use governor::SafetyGovernor;
pub use selftest::{sweep_positions, sweep_test};
pub use wire::format_command;

#[cfg(feature = "serial")]
pub use serial::SerialChannel;
