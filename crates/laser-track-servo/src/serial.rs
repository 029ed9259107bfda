//! Serial transport to the servo controller.

use std::io::{Read, Write};
use std::time::Duration;

use laser_track_core::ActuatorAngles;

use crate::channel::{ActuationChannel, ChannelError};
use crate::wire::format_command;

/// Delay after opening the port, giving the controller time to finish its
/// reset-on-connect before the first command.
const SETTLE_DELAY: Duration = Duration::from_secs(2);

const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Line-oriented serial channel to the servo controller.
///
/// `close` releases the port; the channel stays constructed but refuses
/// further sends.
pub struct SerialChannel {
    port: Option<Box<dyn serialport::SerialPort>>,
    path: String,
}

impl SerialChannel {
    pub const DEFAULT_BAUD: u32 = 9600;

    /// Open the port, wait out the controller reset and log any greeting.
    pub fn connect(path: &str, baud: u32) -> Result<Self, ChannelError> {
        let port = serialport::new(path, baud)
            .timeout(READ_TIMEOUT)
            .open()
            .map_err(|e| ChannelError::Open {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        std::thread::sleep(SETTLE_DELAY);

        let mut channel = Self::from_port(port, path);
        channel.drain_advisory();
        log::info!("connected to servo controller on {}", channel.path);
        Ok(channel)
    }

    /// Wrap an already-open port. No settle delay; the caller owns the
    /// controller-reset timing.
    pub fn from_port(port: Box<dyn serialport::SerialPort>, path: impl Into<String>) -> Self {
        Self {
            port: Some(port),
            path: path.into(),
        }
    }

    /// Read and log whatever the controller has sent, without blocking.
    /// Responses are advisory only; errors here are ignored.
    pub fn drain_advisory(&mut self) {
        let Some(port) = self.port.as_mut() else {
            return;
        };
        let mut buf = [0u8; 256];
        while let Ok(pending) = port.bytes_to_read() {
            if pending == 0 {
                break;
            }
            let n = pending.min(buf.len() as u32) as usize;
            match port.read(&mut buf[..n]) {
                Ok(0) | Err(_) => break,
                Ok(read) => {
                    for line in String::from_utf8_lossy(&buf[..read]).lines() {
                        let line = line.trim();
                        if !line.is_empty() {
                            log::info!("controller: {line}");
                        }
                    }
                }
            }
        }
    }
}

impl ActuationChannel for SerialChannel {
    fn send(&mut self, angles: ActuatorAngles) -> Result<(), ChannelError> {
        let Some(port) = self.port.as_mut() else {
            return Err(ChannelError::Closed);
        };
        port.write_all(format_command(angles).as_bytes())?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), ChannelError> {
        // Flush what the controller has not consumed yet, then drop the
        // port handle. A second close is a no-op.
        if let Some(mut port) = self.port.take() {
            port.flush()?;
            log::info!("released servo controller on {}", self.path);
        }
        Ok(())
    }
}
