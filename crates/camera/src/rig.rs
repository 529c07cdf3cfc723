//! First-person camera rig.
//!
//! Runs once per rendered frame, after any fixed simulation steps for that
//! frame, so it always reads post-physics state. The rig owns only its own
//! pose (pitch, vertical offset, field of view); yaw is applied straight to
//! the character body, and the grounded/sliding flags it consumes come from
//! the motion controller as plain read-only values.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use slipstream_physics::RigidBody;

/// Camera configuration validation error.
#[derive(Debug, Error, PartialEq)]
pub enum CameraConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
}

/// Tunables for the camera rig.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Mouse sensitivity (radians per device unit, scaled by frame time).
    pub mouse_sensitivity: f32,

    // ========================================================================
    // Head bob
    // ========================================================================
    /// Bob phase advance rate (radians/second).
    pub bobbing_speed: f32,

    /// Bob amplitude (meters).
    pub bobbing_amount: f32,

    /// Resting vertical camera offset above the body origin (meters).
    /// Bob and slide offsets are relative to this midpoint.
    pub midpoint: f32,

    // ========================================================================
    // Field of view
    // ========================================================================
    /// Field of view when not sprinting (degrees).
    pub base_fov: f32,

    /// Field of view eased toward while sprinting (degrees).
    pub sprint_fov: f32,

    /// Exponential-decay rate for FOV easing (1/second).
    pub fov_change_speed: f32,

    // ========================================================================
    // Slide camera
    // ========================================================================
    /// Vertical offset added to the midpoint while sliding (negative lowers
    /// the camera).
    pub slide_offset: f32,

    /// Easing rate toward the slide offset (fast).
    pub slide_transition_speed: f32,

    /// Easing rate back toward the midpoint (slower).
    pub slide_return_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 25.0,

            bobbing_speed: 10.0,
            bobbing_amount: 0.05,
            midpoint: 1.6,

            base_fov: 75.0,
            sprint_fov: 85.0,
            fov_change_speed: 8.0,

            slide_offset: -0.8,
            slide_transition_speed: 8.0,
            slide_return_speed: 3.0,
        }
    }
}

impl CameraConfig {
    /// Check that all tunables are usable.
    pub fn validate(&self) -> Result<(), CameraConfigError> {
        let positive = [
            ("mouse_sensitivity", self.mouse_sensitivity),
            ("bobbing_speed", self.bobbing_speed),
            ("base_fov", self.base_fov),
            ("sprint_fov", self.sprint_fov),
            ("fov_change_speed", self.fov_change_speed),
            ("slide_transition_speed", self.slide_transition_speed),
            ("slide_return_speed", self.slide_return_speed),
        ];
        for (name, value) in positive {
            if value <= 0.0 {
                return Err(CameraConfigError::NonPositive { name, value });
            }
        }
        Ok(())
    }
}

/// The rig's mutable pose, updated only during the variable-rate phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraPose {
    /// Look pitch in radians, clamped to `[-π/2, π/2]`.
    pub pitch: f32,

    /// Head-bob phase, wrapping in `[0, 2π)`.
    pub bob_phase: f32,

    /// Vertical camera offset above the body origin (meters).
    pub offset_y: f32,

    /// Field of view the easing is heading toward (degrees).
    pub target_fov: f32,

    /// Current eased field of view (degrees).
    pub current_fov: f32,
}

/// Per-frame inputs the rig consumes.
///
/// `grounded`/`sliding` are the motion controller's read-only flags for this
/// frame; `look_delta` is the latest pointer sample in device units.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraFrame {
    pub look_delta: Vec2,
    pub move_axis: Vec2,
    pub grounded: bool,
    pub sliding: bool,
    pub sprinting: bool,
}

/// Variable-rate first-person camera rig.
#[derive(Debug, Clone)]
pub struct CameraRig {
    config: CameraConfig,
    pose: CameraPose,
}

impl CameraRig {
    /// Create a rig, validating the configuration.
    pub fn new(config: CameraConfig) -> Result<Self, CameraConfigError> {
        config.validate()?;
        let pose = CameraPose {
            pitch: 0.0,
            bob_phase: 0.0,
            offset_y: config.midpoint,
            target_fov: config.base_fov,
            current_fov: config.base_fov,
        };
        Ok(Self { config, pose })
    }

    /// The rig's configuration.
    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Current pose.
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// Camera transform local to the character body: vertical offset plus
    /// the pitch-only rotation. Yaw lives on the body itself.
    pub fn local_transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.pose.offset_y, 0.0))
            * Mat4::from_rotation_x(self.pose.pitch)
    }

    /// Advance the rig by one rendered frame.
    ///
    /// Must run after all fixed steps for the frame so the flags and body
    /// rotation reflect post-physics state.
    pub fn frame_update<B: RigidBody>(&mut self, frame: &CameraFrame, body: &mut B, dt: f32) {
        self.handle_mouse_look(frame.look_delta, body, dt);
        self.handle_vertical_offset(frame, dt);
        self.handle_fov(frame.sprinting, dt);
    }

    // ========================================================================
    // Mouse Look
    // ========================================================================

    fn handle_mouse_look<B: RigidBody>(&mut self, look_delta: Vec2, body: &mut B, dt: f32) {
        let scale = self.config.mouse_sensitivity * dt;

        // Pitch stays local to the rig and is clamped; yaw goes to the body
        // and wraps naturally.
        self.pose.pitch = (self.pose.pitch - look_delta.y * scale).clamp(-FRAC_PI_2, FRAC_PI_2);
        body.apply_yaw(look_delta.x * scale);
    }

    // ========================================================================
    // Head Bob and Slide Offset
    // ========================================================================

    /// Both effects target the same vertical offset. They are serialized
    /// explicitly: the slide offset owns it while sliding (head bob is
    /// skipped entirely), and the bob only engages when grounded and not
    /// sliding. Idle and airborne frames ease back toward the midpoint.
    fn handle_vertical_offset(&mut self, frame: &CameraFrame, dt: f32) {
        let cfg = &self.config;

        if frame.sliding {
            self.pose.bob_phase = 0.0;
            let target = cfg.midpoint + cfg.slide_offset;
            self.pose.offset_y = ease(self.pose.offset_y, target, cfg.slide_transition_speed, dt);
            return;
        }

        let moving = frame.move_axis.x.abs() > 0.01 || frame.move_axis.y.abs() > 0.01;
        if frame.grounded && moving {
            self.pose.bob_phase = (self.pose.bob_phase + cfg.bobbing_speed * dt).rem_euclid(TAU);
            let strength = (frame.move_axis.x.abs() + frame.move_axis.y.abs()).clamp(0.0, 1.0);
            self.pose.offset_y =
                cfg.midpoint + self.pose.bob_phase.sin() * cfg.bobbing_amount * strength;
        } else {
            self.pose.bob_phase = 0.0;
            self.pose.offset_y = ease(self.pose.offset_y, cfg.midpoint, cfg.slide_return_speed, dt);
        }
    }

    // ========================================================================
    // Field of View
    // ========================================================================

    fn handle_fov(&mut self, sprinting: bool, dt: f32) {
        self.pose.target_fov = if sprinting {
            self.config.sprint_fov
        } else {
            self.config.base_fov
        };
        self.pose.current_fov = ease(
            self.pose.current_fov,
            self.pose.target_fov,
            self.config.fov_change_speed,
            dt,
        );
    }
}

/// Framerate-independent exponential decay toward `target`.
fn ease(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    target + (current - target) * (-rate * dt).exp()
}

// ============================================================================
// Tests
// ============================================================================
