//! Character state and the per-frame movement command.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Read-only view of the character's locomotion state.
///
/// Owned exclusively by the motion controller, which mirrors the body's
/// velocity into it at the end of every fixed step. Downstream consumers
/// (the camera rig) read it through accessors and never mutate it.
///
/// Invariants:
/// - While `is_sliding` is set, `slide_direction` is unit-length and fixed
///   for the slide's duration, and `slide_elapsed` increases monotonically.
/// - The vertical velocity component is only ever written by jump and
///   gravity logic, never by horizontal movement planning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterState {
    /// Linear velocity mirrored from the rigid body (meters/second).
    pub linear_velocity: Vec3,

    /// Result of this step's ground probe. Replaced unconditionally every
    /// fixed step; there is no hysteresis.
    pub is_grounded: bool,

    /// Whether the slide state machine is in its `Sliding` state.
    pub is_sliding: bool,

    /// Direction the current slide was launched in (unit length while
    /// sliding).
    pub slide_direction: Vec3,

    /// Fixed-rate time elapsed since the current slide started (seconds).
    pub slide_elapsed: f32,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            linear_velocity: Vec3::ZERO,
            is_grounded: false,
            is_sliding: false,
            slide_direction: Vec3::ZERO,
            slide_elapsed: 0.0,
        }
    }
}

impl CharacterState {
    /// Velocity with the vertical component zeroed.
    #[inline]
    pub fn horizontal_velocity(&self) -> Vec3 {
        Vec3::new(self.linear_velocity.x, 0.0, self.linear_velocity.z)
    }

    /// Speed in the ground plane (meters/second).
    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        self.horizontal_velocity().length()
    }
}

/// The player's intent for one sampled frame, in the form the controller
/// consumes.
///
/// Produced once per variable-rate frame from the input snapshot and latched
/// into the controller; the trigger fields are edge-triggered (true only on
/// the frame the key state changed), not held state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MoveCommand {
    /// Movement axes in `[-1, 1]²`: x strafes right, y moves forward.
    /// Deliberately not normalized; the controller normalizes the combined
    /// world-space vector.
    pub move_axis: Vec2,

    /// Jump key transitioned from released to pressed this frame.
    pub jump_pressed: bool,

    /// Slide key transitioned from released to pressed this frame.
    pub slide_pressed: bool,

    /// Slide key transitioned from pressed to released this frame.
    pub slide_released: bool,
}

impl MoveCommand {
    /// Check if any movement axis is deflected.
    #[inline]
    pub fn has_movement_input(&self) -> bool {
        self.move_axis.x.abs() > 0.01 || self.move_axis.y.abs() > 0.01
    }
}

/// Horizontal forward axis for a body yaw (radians about +Y).
#[inline]
pub fn forward_axis(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(cos_yaw, 0.0, sin_yaw)
}

/// Horizontal right axis for a body yaw (radians about +Y).
#[inline]
pub fn right_axis(yaw: f32) -> Vec3 {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    Vec3::new(-sin_yaw, 0.0, cos_yaw)
}
