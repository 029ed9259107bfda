//! Servo wiring self-test.

use std::time::{Duration, Instant};

use laser_track_core::ActuatorAngles;

use crate::channel::{ActuationChannel, ChannelError};
use crate::governor::SafetyGovernor;

/// Fixed sweep used to verify wiring and power: center, left, right, down,
/// up, center again.
pub fn sweep_positions() -> [(ActuatorAngles, &'static str); 6] {
    [
        (ActuatorAngles::new(90, 90), "center"),
        (ActuatorAngles::new(45, 90), "left"),
        (ActuatorAngles::new(135, 90), "right"),
        (ActuatorAngles::new(90, 45), "down"),
        (ActuatorAngles::new(90, 135), "up"),
        (ActuatorAngles::new(90, 90), "center"),
    ]
}

/// Drive the sweep through the governor and channel, pausing `pace` between
/// positions. Returns the number of commands actually transmitted (the
/// governor may suppress or trim sweep moves like any others).
pub fn sweep_test<C: ActuationChannel>(
    channel: &mut C,
    governor: &mut SafetyGovernor,
    pace: Duration,
) -> Result<usize, ChannelError> {
    let mut sent = 0usize;
    for (target, name) in sweep_positions() {
        if let Some(governed) = governor.govern(target, Instant::now()) {
            log::info!("sweep {name}: X={} Y={}", governed.x, governed.y);
            channel.send(governed)?;
            sent += 1;
        } else {
            log::debug!("sweep {name}: suppressed by rate limit");
        }
        if !pace.is_zero() {
            std::thread::sleep(pace);
        }
    }
    Ok(sent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::SimulatedChannel;
    use laser_track_core::SafetyLimits;

    #[test]
    fn sweep_sends_every_position_with_open_limits() {
        let limits = SafetyLimits {
            safe_min: 0,
            safe_max: 180,
            max_step: 90,
            min_move_delay_ms: 0,
        };
        let mut governor = SafetyGovernor::new(limits);
        let mut channel = SimulatedChannel::new();
        let log = channel.clone();

        let sent = sweep_test(&mut channel, &mut governor, Duration::ZERO).unwrap();
        assert_eq!(sent, 6);
        let recorded = log.sent();
        assert_eq!(recorded.first(), Some(&ActuatorAngles::new(90, 90)));
        assert_eq!(recorded[1], ActuatorAngles::new(45, 90));
        assert_eq!(recorded.last(), Some(&ActuatorAngles::new(90, 90)));
    }

    #[test]
    fn sweep_is_governed_by_the_step_limit() {
        let mut governor = SafetyGovernor::new(SafetyLimits {
            min_move_delay_ms: 0,
            ..SafetyLimits::default()
        });
        let mut channel = SimulatedChannel::new();
        let log = channel.clone();

        sweep_test(&mut channel, &mut governor, Duration::ZERO).unwrap();
        // Second position asks for 45 but the step limit holds it to 70.
        assert_eq!(log.sent()[1], ActuatorAngles::new(70, 90));
    }
}
