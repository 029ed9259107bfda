use std::time::Instant;

use laser_track_core::{ActuatorAngles, SafetyLimits};

/// The sole gate between any computed target and the physical actuator.
///
/// Owns the last transmitted angles and timestamp; both mutate exactly once
/// per accepted command. `last_sent` starts at the centered position, so
/// the first real command is step-limited relative to center.
#[derive(Clone, Debug)]
pub struct SafetyGovernor {
    limits: SafetyLimits,
    last_sent: ActuatorAngles,
    last_sent_at: Option<Instant>,
    corrections: u64,
}

impl SafetyGovernor {
    pub fn new(limits: SafetyLimits) -> Self {
        Self {
            limits,
            last_sent: ActuatorAngles::CENTER,
            last_sent_at: None,
            corrections: 0,
        }
    }

    pub fn limits(&self) -> &SafetyLimits {
        &self.limits
    }

    /// Angles of the last accepted command (the centered default before any
    /// command was accepted).
    pub fn last_sent(&self) -> ActuatorAngles {
        self.last_sent
    }

    /// How often clamping or step-limiting altered a candidate. Silent
    /// correction is a guarantee, not a fault; this counter exists for
    /// diagnosability only.
    pub fn corrections(&self) -> u64 {
        self.corrections
    }

    /// Gate one candidate command.
    ///
    /// Returns `None` and leaves all state untouched when the candidate
    /// arrives inside the minimum move interval. Otherwise clamps both axes
    /// into the safe range, limits the per-axis step from the last sent
    /// angles, commits the result and returns it.
    ///
    /// Rate-limited candidates are dropped, not queued: the control loop
    /// recomputes the freshest target every frame, so the next eligible
    /// command already carries the newest position.
    pub fn govern(&mut self, candidate: ActuatorAngles, now: Instant) -> Option<ActuatorAngles> {
        if let Some(last_at) = self.last_sent_at {
            if now.saturating_duration_since(last_at) < self.limits.min_move_delay() {
                return None;
            }
        }

        let clamped = ActuatorAngles {
            x: candidate.x.clamp(self.limits.safe_min, self.limits.safe_max),
            y: candidate.y.clamp(self.limits.safe_min, self.limits.safe_max),
        };
        let stepped = ActuatorAngles {
            x: step_toward(self.last_sent.x, clamped.x, self.limits.max_step),
            y: step_toward(self.last_sent.y, clamped.y, self.limits.max_step),
        };

        if stepped != candidate {
            self.corrections += 1;
        }
        self.last_sent = stepped;
        self.last_sent_at = Some(now);
        Some(stepped)
    }
}

/// Move from `last` toward `target` by at most `max_step`.
fn step_toward(last: i32, target: i32, max_step: i32) -> i32 {
    let delta = target - last;
    if delta.abs() <= max_step {
        target
    } else if delta > 0 {
        last + max_step
    } else {
        last - max_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn limits(max_step: i32, delay_ms: u64) -> SafetyLimits {
        SafetyLimits {
            safe_min: 10,
            safe_max: 170,
            max_step,
            min_move_delay_ms: delay_ms,
        }
    }

    #[test]
    fn clamps_to_nearest_safe_bound() {
        // Large step budget isolates the clamp.
        let mut gov = SafetyGovernor::new(limits(1000, 0));
        let t = Instant::now();
        assert_eq!(
            gov.govern(ActuatorAngles::new(200, -40), t),
            Some(ActuatorAngles::new(170, 10))
        );
        assert_eq!(gov.corrections(), 1);
    }

    #[test]
    fn limits_step_toward_candidate() {
        let mut gov = SafetyGovernor::new(limits(20, 0));
        let t = Instant::now();
        // From center (90, 90): +60 on x, −60 on y, both capped at 20.
        assert_eq!(
            gov.govern(ActuatorAngles::new(150, 30), t),
            Some(ActuatorAngles::new(110, 70))
        );
        // Within one step: passes through unchanged.
        assert_eq!(
            gov.govern(ActuatorAngles::new(115, 65), t + Duration::from_millis(1)),
            Some(ActuatorAngles::new(115, 65))
        );
        assert_eq!(gov.last_sent(), ActuatorAngles::new(115, 65));
    }

    #[test]
    fn first_command_is_step_limited_from_center() {
        let mut gov = SafetyGovernor::new(limits(20, 50));
        assert_eq!(gov.last_sent(), ActuatorAngles::CENTER);
        assert_eq!(
            gov.govern(ActuatorAngles::new(150, 125), Instant::now()),
            Some(ActuatorAngles::new(110, 110))
        );
    }

    #[test]
    fn rate_limit_suppresses_and_leaves_state_untouched() {
        let mut gov = SafetyGovernor::new(limits(20, 50));
        let t0 = Instant::now();
        let first = gov.govern(ActuatorAngles::new(100, 100), t0);
        assert_eq!(first, Some(ActuatorAngles::new(100, 100)));
        let corrections = gov.corrections();

        let t1 = t0 + Duration::from_millis(10);
        assert_eq!(gov.govern(ActuatorAngles::new(130, 130), t1), None);
        assert_eq!(gov.last_sent(), ActuatorAngles::new(100, 100));
        assert_eq!(gov.corrections(), corrections);

        // Interval elapsed: accepted again.
        let t2 = t0 + Duration::from_millis(50);
        assert_eq!(
            gov.govern(ActuatorAngles::new(130, 130), t2),
            Some(ActuatorAngles::new(120, 120))
        );
    }

    #[test]
    fn in_range_small_move_is_not_counted_as_correction() {
        let mut gov = SafetyGovernor::new(limits(20, 0));
        gov.govern(ActuatorAngles::new(95, 85), Instant::now());
        assert_eq!(gov.corrections(), 0);
    }
}
