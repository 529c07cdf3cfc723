//! Motion configuration constants.
//!
//! All movement tunables are grouped here. Values use metric units
//! (meters, seconds) unless otherwise noted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::body::LayerMask;

/// Configuration validation error.
///
/// A controller is never constructed from an invalid config; the error
/// carries enough detail to report which tunable is off.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("velocity_blend must be in (0, 1], got {0}")]
    BlendOutOfRange(f32),
}

/// Configuration for the fixed-rate motion controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    // ========================================================================
    // Movement
    // ========================================================================
    /// Target horizontal speed while grounded or airborne (meters/second).
    pub move_speed: f32,

    /// Per-step lerp factor blending current velocity toward the planned
    /// target. 1.0 replaces velocity outright; lower values smooth jitter.
    pub velocity_blend: f32,

    // ========================================================================
    // Jumping
    // ========================================================================
    /// Vertical velocity set by a jump (meters/second). Doubled when the
    /// jump fires mid-slide.
    pub jump_force: f32,

    // ========================================================================
    // Drag
    // ========================================================================
    /// Linear damping while grounded and not sliding.
    pub ground_drag: f32,

    /// Linear damping while airborne (lowest of the three).
    pub air_drag: f32,

    /// Linear damping while sliding (highest of the three).
    pub slide_drag: f32,

    // ========================================================================
    // Sliding
    // ========================================================================
    /// Base slide speed (meters/second).
    pub slide_speed: f32,

    /// Configured slide duration (seconds). The slide timer runs for half
    /// of this.
    pub slide_duration: f32,

    /// Multiplier applied to `slide_speed` while the boost is active.
    pub slide_multiplier: f32,

    // ========================================================================
    // Gravity
    // ========================================================================
    /// Extra gravity on top of the engine's built-in gravity. 1.0 adds
    /// nothing; 2.0 adds one extra standard-gravity of acceleration.
    pub gravity_multiplier: f32,

    // ========================================================================
    // Ground probe
    // ========================================================================
    /// Distance below the body origin at which the overlap test runs.
    pub ground_distance: f32,

    /// Radius of the ground-overlap sphere.
    pub ground_radius: f32,

    /// Layers considered walkable ground.
    pub ground_mask: LayerMask,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 12.0,
            velocity_blend: 0.75,

            jump_force: 9.0,

            ground_drag: 4.0,
            air_drag: 0.5,
            slide_drag: 6.0,

            slide_speed: 12.0,
            slide_duration: 1.5,
            slide_multiplier: 3.0,

            gravity_multiplier: 1.5,

            ground_distance: 0.4,
            ground_radius: 0.3,
            ground_mask: LayerMask::GROUND,
        }
    }
}

impl MotionConfig {
    /// Check that all tunables are usable.
    ///
    /// An empty `ground_mask` is deliberately *not* an error here: it
    /// degrades to "never grounded" at runtime (see the ground probe).
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("jump_force", self.jump_force),
            ("slide_speed", self.slide_speed),
            ("slide_duration", self.slide_duration),
            ("slide_multiplier", self.slide_multiplier),
            ("ground_distance", self.ground_distance),
            ("ground_radius", self.ground_radius),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        let non_negative = [
            ("ground_drag", self.ground_drag),
            ("air_drag", self.air_drag),
            ("slide_drag", self.slide_drag),
            ("gravity_multiplier", self.gravity_multiplier),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }

        if self.velocity_blend <= 0.0 || self.velocity_blend > 1.0 {
            return Err(ConfigError::BlendOutOfRange(self.velocity_blend));
        }

        Ok(())
    }

    /// Horizontal slide-boost speed (`slide_speed * slide_multiplier`).
    #[inline]
    pub fn slide_boost_speed(&self) -> f32 {
        self.slide_speed * self.slide_multiplier
    }

    /// Duration the slide timer actually runs for.
    #[inline]
    pub fn slide_timer_duration(&self) -> f32 {
        self.slide_duration / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = MotionConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.move_speed > 0.0);
    }

    #[test]
    fn test_drag_ordering() {
        // Sliding drag highest, airborne lowest.
        let config = MotionConfig::default();
        assert!(config.slide_drag > config.ground_drag);
        assert!(config.ground_drag > config.air_drag);
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let config = MotionConfig {
            move_speed: 0.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositive {
                name: "move_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_blend_out_of_range() {
        let config = MotionConfig {
            velocity_blend: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BlendOutOfRange(1.5)));
    }

    #[test]
    fn test_empty_ground_mask_is_allowed() {
        // Degrades at runtime instead of failing construction.
        let config = MotionConfig {
            ground_mask: LayerMask::NONE,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_slide_timer_is_half_duration() {
        let config = MotionConfig::default();
        assert!((config.slide_timer_duration() - config.slide_duration / 2.0).abs() < 1e-6);
    }
}
