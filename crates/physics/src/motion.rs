//! Fixed-rate motion controller.
//!
//! Owns the character's locomotion state and drives the externally
//! integrated rigid body: horizontal velocity planning, the jump impulse,
//! the slide state machine, drag selection, and the extra-gravity force.
//!
//! # Rate boundary
//!
//! Input is sampled at the variable render rate but consumed here at the
//! fixed simulation rate. Edge triggers cross that boundary as latched,
//! single-consume flags: [`MotionController::capture`] sets them once per
//! rendered frame and [`MotionController::fixed_step`] clears them, so a
//! trigger is neither dropped when no fixed step runs that frame nor
//! duplicated when several do.
//!
//! # Step ordering
//!
//! Within one fixed step: ground check, slide entry, movement, jump, slide
//! exit/timer, drag, gravity. Movement runs before jump (the jump only
//! overwrites the vertical axis of the velocity movement just planned), and
//! slide exit runs after both so that ending a slide leaves exactly zero
//! horizontal velocity for the step. Drag and gravity see the finalized
//! velocity.

use std::mem;

use glam::{Vec2, Vec3};

use crate::body::{ForceMode, GroundQuery, RigidBody};
use crate::config::{ConfigError, MotionConfig};
use crate::probe::GroundProbe;
use crate::slide::SlideTimer;
use crate::state::{forward_axis, right_axis, CharacterState, MoveCommand};

/// Standard gravity (meters/second²).
pub const STANDARD_GRAVITY: f32 = 9.81;

/// Horizontal speed above which a slide overrides movement planning with
/// the boosted slide vector.
pub const SLIDE_BOOST_MIN_SPEED: f32 = 10.0;

/// Horizontal speed above which slide entry captures the movement direction
/// instead of falling back to the body's forward axis.
pub const SLIDE_DIRECTION_MIN_SPEED: f32 = 0.1;

/// Fixed-rate character motion controller.
///
/// # Example
///
/// ```ignore
/// let mut controller = MotionController::new(MotionConfig::default())?;
///
/// // Once per rendered frame:
/// controller.capture(&command);
///
/// // Zero or more times per rendered frame:
/// controller.fixed_step(&mut body, &world, dt);
/// ```
#[derive(Debug, Clone)]
pub struct MotionController {
    config: MotionConfig,
    probe: GroundProbe,
    state: CharacterState,

    // Latched across the variable-rate -> fixed-rate boundary.
    move_axis: Vec2,
    jump_requested: bool,
    slide_down_pending: bool,
    slide_up_pending: bool,

    slide_timer: Option<SlideTimer>,
}

impl MotionController {
    /// Create a controller, validating the configuration.
    pub fn new(config: MotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let probe = GroundProbe::new(
            config.ground_radius,
            config.ground_distance,
            config.ground_mask,
        );

        Ok(Self {
            config,
            probe,
            state: CharacterState::default(),
            move_axis: Vec2::ZERO,
            jump_requested: false,
            slide_down_pending: false,
            slide_up_pending: false,
            slide_timer: None,
        })
    }

    /// The controller's configuration.
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Read-only locomotion state for downstream consumers.
    pub fn state(&self) -> &CharacterState {
        &self.state
    }

    /// Whether the last ground probe reported contact.
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded
    }

    /// Whether the slide state machine is in its sliding state.
    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.state.is_sliding
    }

    /// Latch this frame's command across the rate boundary.
    ///
    /// Called once per variable-rate frame. The jump request is only queued
    /// when the character is grounded at capture time; an airborne press is
    /// dropped rather than buffered.
    pub fn capture(&mut self, command: &MoveCommand) {
        self.move_axis = command.move_axis;

        if command.jump_pressed && self.state.is_grounded {
            self.jump_requested = true;
        }
        if command.slide_pressed {
            self.slide_down_pending = true;
        }
        if command.slide_released {
            self.slide_up_pending = true;
        }
    }

    /// Advance locomotion by one fixed step.
    pub fn fixed_step<B, W>(&mut self, body: &mut B, world: &W, dt: f32)
    where
        B: RigidBody,
        W: GroundQuery,
    {
        self.check_ground(body, world);
        self.handle_slide_entry(body);
        self.handle_movement(body);
        self.handle_jump(body);
        self.handle_slide_exit(body, dt);
        self.apply_drag(body);
        self.apply_gravity(body);

        // Mirror the body so readers see post-step state.
        self.state.linear_velocity = body.linear_velocity();
        if self.state.is_sliding {
            self.state.slide_elapsed += dt;
        }
    }

    // ========================================================================
    // Ground Detection
    // ========================================================================

    fn check_ground<B: RigidBody, W: GroundQuery>(&mut self, body: &B, world: &W) {
        self.state.is_grounded = self.probe.check(world, body.position());
    }

    // ========================================================================
    // Movement
    // ========================================================================

    fn handle_movement<B: RigidBody>(&mut self, body: &mut B) {
        let velocity = body.linear_velocity();
        let target = self.target_velocity(body);

        // Constant-fraction blend toward the plan; the vertical component is
        // identical on both sides, so it passes through untouched.
        let blended = velocity.lerp(target, self.config.velocity_blend);
        body.set_linear_velocity(blended);
    }

    /// Planned velocity for this step: a horizontal target with the current
    /// vertical velocity preserved.
    fn target_velocity<B: RigidBody>(&self, body: &B) -> Vec3 {
        let velocity = body.linear_velocity();
        let horizontal_speed = Vec3::new(velocity.x, 0.0, velocity.z).length();

        let horizontal = if self.state.is_sliding && horizontal_speed > SLIDE_BOOST_MIN_SPEED {
            // Boost branch: a fixed vector launched at slide entry, not
            // re-derived from input.
            self.state.slide_direction * self.config.slide_boost_speed()
        } else {
            let wish = right_axis(body.yaw()) * self.move_axis.x
                + forward_axis(body.yaw()) * self.move_axis.y;
            if wish.length_squared() > f32::EPSILON {
                wish.normalize() * self.config.move_speed
            } else {
                Vec3::ZERO
            }
        };

        Vec3::new(horizontal.x, velocity.y, horizontal.z)
    }

    // ========================================================================
    // Jumping
    // ========================================================================

    fn handle_jump<B: RigidBody>(&mut self, body: &mut B) {
        if !mem::take(&mut self.jump_requested) {
            return;
        }

        // Slide-jump chaining pays double.
        let jump_speed = if self.state.is_sliding {
            self.config.jump_force * 2.0
        } else {
            self.config.jump_force
        };

        let mut velocity = body.linear_velocity();
        velocity.y = jump_speed;
        body.set_linear_velocity(velocity);

        log::debug!("jump: vertical velocity set to {jump_speed}");
    }

    // ========================================================================
    // Sliding
    // ========================================================================

    fn handle_slide_entry<B: RigidBody>(&mut self, body: &B) {
        if !mem::take(&mut self.slide_down_pending) {
            return;
        }
        // State-machine guard: no re-entry while sliding, no entry airborne.
        if self.state.is_sliding || !self.state.is_grounded {
            return;
        }

        let velocity = body.linear_velocity();
        let horizontal = Vec3::new(velocity.x, 0.0, velocity.z);
        let direction = if horizontal.length() > SLIDE_DIRECTION_MIN_SPEED {
            horizontal.normalize()
        } else {
            forward_axis(body.yaw())
        };

        self.state.is_sliding = true;
        self.state.slide_direction = direction;
        self.state.slide_elapsed = 0.0;
        self.slide_timer = Some(SlideTimer::start(self.config.slide_timer_duration()));

        log::debug!("slide started, direction {direction:?}");
    }

    fn handle_slide_exit<B: RigidBody>(&mut self, body: &mut B, dt: f32) {
        // Consume the release edge unconditionally so a stale release can
        // never cancel a future slide.
        let released = mem::take(&mut self.slide_up_pending);

        if !self.state.is_sliding {
            return;
        }

        if released {
            // Early cancellation: drop the pending countdown and run the
            // end-of-slide logic synchronously.
            self.slide_timer = None;
            self.end_slide(body);
        } else if let Some(timer) = &mut self.slide_timer {
            if timer.tick(dt) {
                self.slide_timer = None;
                self.end_slide(body);
            }
        }
    }

    /// End-of-slide logic, reached by exactly one of the two exit paths.
    fn end_slide<B: RigidBody>(&mut self, body: &mut B) {
        // Hard stop: zero the horizontal components, keep the vertical one.
        let mut velocity = body.linear_velocity();
        velocity.x = 0.0;
        velocity.z = 0.0;
        body.set_linear_velocity(velocity);

        self.state.is_sliding = false;

        log::debug!("slide ended after {:.3}s", self.state.slide_elapsed);
    }

    // ========================================================================
    // Drag and Gravity
    // ========================================================================

    fn apply_drag<B: RigidBody>(&self, body: &mut B) {
        let drag = if self.state.is_sliding {
            self.config.slide_drag
        } else if self.state.is_grounded {
            self.config.ground_drag
        } else {
            self.config.air_drag
        };
        body.set_linear_damping(drag);
    }

    fn apply_gravity<B: RigidBody>(&self, body: &mut B) {
        // Layered on top of the engine's built-in gravity, never replacing it.
        if self.config.gravity_multiplier > 1.0 {
            let extra = (self.config.gravity_multiplier - 1.0) * STANDARD_GRAVITY;
            body.add_force(Vec3::NEG_Y * extra, ForceMode::Acceleration);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
