//! Slide countdown timer.
//!
//! A slide runs for half the configured slide duration unless the trigger is
//! released first. The timer is an explicit cooperative countdown, not a
//! suspended task: the controller ticks it once per fixed step and cancels
//! it synchronously by dropping it.

use serde::{Deserialize, Serialize};

/// Cancellable countdown driving a slide's natural expiry.
///
/// Created on slide entry, dropped on early cancellation, and reported as
/// expired exactly once: `tick` returns true on the step the countdown
/// crosses zero, after which the owner is expected to discard the timer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SlideTimer {
    remaining: f32,
}

impl SlideTimer {
    /// Start a countdown of `duration` seconds.
    pub fn start(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    /// Advance the countdown by one fixed step.
    ///
    /// Returns true when the countdown expires on this tick.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt;
        self.remaining <= 0.0
    }

    /// Seconds left on the countdown.
    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.02;

    #[test]
    fn test_expires_after_duration() {
        // Binary-exact values so the tick count is deterministic.
        let mut timer = SlideTimer::start(1.0);

        assert!(!timer.tick(0.25)); // 0.75
        assert!(!timer.tick(0.25)); // 0.50
        assert!(!timer.tick(0.25)); // 0.25
        assert!(timer.tick(0.25)); // expired
    }

    #[test]
    fn test_expires_exactly_once() {
        let mut timer = SlideTimer::start(0.01);

        assert!(timer.tick(DT));
        // Ticking a spent timer never reports expiry again.
        assert!(!timer.tick(DT));
        assert!(!timer.tick(DT));
    }

    #[test]
    fn test_remaining_never_negative() {
        let mut timer = SlideTimer::start(0.01);
        let _ = timer.tick(DT);
        assert_eq!(timer.remaining(), 0.0);
    }

    #[test]
    fn test_zero_duration_is_already_spent() {
        // Config validation rejects a zero slide duration; if one slips
        // through, the timer reads as spent instead of expiring repeatedly.
        let mut timer = SlideTimer::start(0.0);
        assert!(!timer.tick(DT));
        assert_eq!(timer.remaining(), 0.0);
    }
}
