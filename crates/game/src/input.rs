//! Input sampling.
//!
//! Converts raw per-frame device state (held keys, pointer delta) into an
//! immutable [`InputSnapshot`] with edge-triggered flags. Sampling happens
//! once per variable-rate frame; edge detection compares against the
//! previous frame's key bitset, so a flag is true only on the single frame
//! the key state changed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use slipstream_physics::MoveCommand;

/// Held-key bitset for one sampled frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys(pub u16);

impl Keys {
    /// Move forward.
    pub const FORWARD: u16 = 1 << 0;

    /// Move backward.
    pub const BACK: u16 = 1 << 1;

    /// Strafe left.
    pub const LEFT: u16 = 1 << 2;

    /// Strafe right.
    pub const RIGHT: u16 = 1 << 3;

    /// Jump.
    pub const JUMP: u16 = 1 << 4;

    /// Slide.
    pub const SLIDE: u16 = 1 << 5;

    /// Sprint (held modifier).
    pub const SPRINT: u16 = 1 << 6;

    /// Fire.
    pub const FIRE: u16 = 1 << 7;

    /// Escape / focus toggle.
    pub const ESCAPE: u16 = 1 << 8;

    /// Check if a key is held.
    #[inline]
    pub fn pressed(self, key: u16) -> bool {
        (self.0 & key) != 0
    }

    /// Press a key.
    #[inline]
    pub fn press(&mut self, key: u16) {
        self.0 |= key;
    }

    /// Release a key.
    #[inline]
    pub fn release(&mut self, key: u16) {
        self.0 &= !key;
    }
}

/// Raw device state for one variable-rate frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawInput {
    /// Keys currently held.
    pub keys: Keys,

    /// Pointer delta since the last sample (device units, unbounded).
    pub mouse_delta: Vec2,
}

/// Stable snapshot of one frame's input.
///
/// Recreated every frame and immutable once captured. The `*_pressed` /
/// `*_released` fields are edge-triggered; `move_axis` and `sprint_held`
/// are level state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    /// Movement axes in `[-1, 1]²`: x strafes right, y moves forward.
    /// Not normalized; a diagonal has magnitude √2.
    pub move_axis: Vec2,

    /// Pointer delta for this frame (device units).
    pub look_delta: Vec2,

    /// Jump key went down this frame.
    pub jump_pressed: bool,

    /// Slide key went down this frame.
    pub slide_pressed: bool,

    /// Slide key came up this frame.
    pub slide_released: bool,

    /// Escape key went down this frame.
    pub escape_pressed: bool,

    /// Fire key went down this frame.
    pub fire_pressed: bool,

    /// Sprint modifier is held.
    pub sprint_held: bool,
}

impl InputSnapshot {
    /// The movement portion of the snapshot, in the form the motion
    /// controller latches.
    pub fn to_command(&self) -> MoveCommand {
        MoveCommand {
            move_axis: self.move_axis,
            jump_pressed: self.jump_pressed,
            slide_pressed: self.slide_pressed,
            slide_released: self.slide_released,
        }
    }
}

/// Per-frame input sampler with edge detection.
#[derive(Debug, Default)]
pub struct InputSampler {
    prev: Keys,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a snapshot for this frame and advance the edge-detection
    /// state.
    pub fn sample(&mut self, raw: &RawInput) -> InputSnapshot {
        let keys = raw.keys;
        let prev = self.prev;
        self.prev = keys;

        let just_pressed = |key: u16| keys.pressed(key) && !prev.pressed(key);
        let just_released = |key: u16| !keys.pressed(key) && prev.pressed(key);

        let mut move_axis = Vec2::ZERO;
        if keys.pressed(Keys::FORWARD) {
            move_axis.y += 1.0;
        }
        if keys.pressed(Keys::BACK) {
            move_axis.y -= 1.0;
        }
        if keys.pressed(Keys::RIGHT) {
            move_axis.x += 1.0;
        }
        if keys.pressed(Keys::LEFT) {
            move_axis.x -= 1.0;
        }

        InputSnapshot {
            move_axis,
            look_delta: raw.mouse_delta,
            jump_pressed: just_pressed(Keys::JUMP),
            slide_pressed: just_pressed(Keys::SLIDE),
            slide_released: just_released(Keys::SLIDE),
            escape_pressed: just_pressed(Keys::ESCAPE),
            fire_pressed: just_pressed(Keys::FIRE),
            sprint_held: keys.pressed(Keys::SPRINT),
        }
    }

    /// Forget held state, e.g. on focus loss.
    pub fn reset(&mut self) {
        self.prev = Keys::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(keys: Keys) -> RawInput {
        RawInput {
            keys,
            mouse_delta: Vec2::ZERO,
        }
    }

    #[test]
    fn test_move_axis_mapping() {
        let mut sampler = InputSampler::new();

        let mut keys = Keys::default();
        keys.press(Keys::FORWARD);
        keys.press(Keys::RIGHT);

        let snapshot = sampler.sample(&raw(keys));
        assert_eq!(snapshot.move_axis, Vec2::new(1.0, 1.0));

        // Opposing keys cancel.
        keys.press(Keys::BACK);
        keys.press(Keys::LEFT);
        let snapshot = sampler.sample(&raw(keys));
        assert_eq!(snapshot.move_axis, Vec2::ZERO);
    }

    #[test]
    fn test_move_axis_is_not_normalized() {
        let mut sampler = InputSampler::new();
        let mut keys = Keys::default();
        keys.press(Keys::FORWARD);
        keys.press(Keys::RIGHT);

        let snapshot = sampler.sample(&raw(keys));
        assert!((snapshot.move_axis.length() - 2.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_jump_edge_fires_once() {
        let mut sampler = InputSampler::new();
        let mut keys = Keys::default();
        keys.press(Keys::JUMP);

        // Down edge.
        assert!(sampler.sample(&raw(keys)).jump_pressed);
        // Held: no further edges.
        assert!(!sampler.sample(&raw(keys)).jump_pressed);
        assert!(!sampler.sample(&raw(keys)).jump_pressed);

        // Release and press again: a new edge.
        keys.release(Keys::JUMP);
        assert!(!sampler.sample(&raw(keys)).jump_pressed);
        keys.press(Keys::JUMP);
        assert!(sampler.sample(&raw(keys)).jump_pressed);
    }

    #[test]
    fn test_slide_release_edge() {
        let mut sampler = InputSampler::new();
        let mut keys = Keys::default();

        keys.press(Keys::SLIDE);
        let snapshot = sampler.sample(&raw(keys));
        assert!(snapshot.slide_pressed);
        assert!(!snapshot.slide_released);

        keys.release(Keys::SLIDE);
        let snapshot = sampler.sample(&raw(keys));
        assert!(!snapshot.slide_pressed);
        assert!(snapshot.slide_released);

        // No further release edges while up.
        assert!(!sampler.sample(&raw(keys)).slide_released);
    }

    #[test]
    fn test_sprint_is_level_not_edge() {
        let mut sampler = InputSampler::new();
        let mut keys = Keys::default();
        keys.press(Keys::SPRINT);

        assert!(sampler.sample(&raw(keys)).sprint_held);
        assert!(sampler.sample(&raw(keys)).sprint_held);
    }

    #[test]
    fn test_reset_rearms_edges() {
        let mut sampler = InputSampler::new();
        let mut keys = Keys::default();
        keys.press(Keys::JUMP);

        assert!(sampler.sample(&raw(keys)).jump_pressed);
        sampler.reset();
        // Still held, but the sampler forgot: a fresh edge.
        assert!(sampler.sample(&raw(keys)).jump_pressed);
    }

    #[test]
    fn test_look_delta_passthrough() {
        let mut sampler = InputSampler::new();
        let raw = RawInput {
            keys: Keys::default(),
            mouse_delta: Vec2::new(12.5, -3.0),
        };
        let snapshot = sampler.sample(&raw);
        assert_eq!(snapshot.look_delta, Vec2::new(12.5, -3.0));
    }

    #[test]
    fn test_to_command_carries_movement_fields() {
        let mut sampler = InputSampler::new();
        let mut keys = Keys::default();
        keys.press(Keys::FORWARD);
        keys.press(Keys::SLIDE);

        let command = sampler.sample(&raw(keys)).to_command();
        assert_eq!(command.move_axis, Vec2::new(0.0, 1.0));
        assert!(command.slide_pressed);
        assert!(!command.slide_released);
        assert!(!command.jump_pressed);
    }
}
