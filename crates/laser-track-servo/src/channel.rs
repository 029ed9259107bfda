use std::sync::{Arc, Mutex};

use laser_track_core::ActuatorAngles;

/// Transport failures. Losing the transport is recoverable: the control
/// loop degrades to simulated operation.
#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    #[error("failed to open transport {path}: {message}")]
    Open { path: String, message: String },

    #[error("transport write failed")]
    Write(#[from] std::io::Error),

    #[error("transport already released")]
    Closed,
}

/// Command transport for governed angle pairs.
///
/// `send` must not block waiting for acknowledgment in steady state; any
/// controller response is advisory logging only.
pub trait ActuationChannel {
    fn send(&mut self, angles: ActuatorAngles) -> Result<(), ChannelError>;

    /// Release the transport. Idempotent; the default is a no-op.
    fn close(&mut self) -> Result<(), ChannelError> {
        Ok(())
    }
}

/// Transmit no-op that records every command, for hardware-free operation
/// and tests. Mapping and governing run identically either way.
#[derive(Clone, Debug, Default)]
pub struct SimulatedChannel {
    sent: Arc<Mutex<Vec<ActuatorAngles>>>,
}

impl SimulatedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every command accepted so far, oldest first.
    pub fn sent(&self) -> Vec<ActuatorAngles> {
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ActuationChannel for SimulatedChannel {
    fn send(&mut self, angles: ActuatorAngles) -> Result<(), ChannelError> {
        log::debug!("simulated send: {}", crate::format_command(angles).trim());
        self.sent
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(angles);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_channel_records_in_order() {
        let mut channel = SimulatedChannel::new();
        let log = channel.clone();
        channel.send(ActuatorAngles::new(100, 90)).unwrap();
        channel.send(ActuatorAngles::new(110, 95)).unwrap();
        channel.close().unwrap();
        assert_eq!(
            log.sent(),
            vec![ActuatorAngles::new(100, 90), ActuatorAngles::new(110, 95)]
        );
    }
}
