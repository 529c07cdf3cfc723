//! The per-frame session loop.
//!
//! Couples the variable-rate phase (input sampling, camera) to the
//! fixed-rate phase (motion controller, body integration) with a time
//! accumulator. Each rendered frame:
//!
//! 1. Sample input and latch the command into the controller.
//! 2. Dispatch platform side effects (cursor capture, weapon visibility).
//! 3. Run zero or more fixed steps, each advancing controller then body.
//! 4. Update the camera rig, which therefore always reads post-physics
//!    state.
//!
//! Everything runs on one logical thread; there is no parallel mutation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use slipstream_camera::{CameraConfig, CameraConfigError, CameraFrame, CameraRig};
use slipstream_physics::{ConfigError, GroundQuery, MotionConfig, MotionController, RigidBody};

use crate::input::{InputSampler, RawInput};

/// Longest frame delta the accumulator will absorb (seconds). Longer frames
/// (debugger pauses, window drags) are clamped instead of triggering a
/// catch-up burst of fixed steps.
const MAX_FRAME_DELTA: f32 = 0.25;

/// Session construction error.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("tick_rate must be non-zero")]
    ZeroTickRate,

    #[error(transparent)]
    Motion(#[from] ConfigError),

    #[error(transparent)]
    Camera(#[from] CameraConfigError),
}

/// Session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fixed simulation rate (steps per second).
    pub tick_rate: u32,

    /// Motion controller tunables.
    pub motion: MotionConfig,

    /// Camera rig tunables.
    pub camera: CameraConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate: 50,
            motion: MotionConfig::default(),
            camera: CameraConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Fixed timestep in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }
}

/// Side-effecting platform calls triggered by input edges. Both are outside
/// the locomotion core; implementations talk to the windowing system and
/// the render scene.
pub trait PlatformHooks {
    /// Called when cursor capture should change (escape edge).
    fn set_cursor_captured(&mut self, _captured: bool) {}

    /// Called when the weapon model's visibility should change (fire edge).
    fn set_weapon_visible(&mut self, _visible: bool) {}
}

/// Hooks that do nothing, for headless use.
#[derive(Debug, Default)]
pub struct NullHooks;

impl PlatformHooks for NullHooks {}

/// One character's locomotion session: sampler, controller, camera, and the
/// externally supplied body and world.
#[derive(Debug)]
pub struct Session<B, W>
where
    B: RigidBody,
    W: GroundQuery,
{
    config: SessionConfig,
    sampler: InputSampler,
    controller: MotionController,
    camera: CameraRig,
    body: B,
    world: W,

    accumulator: f32,
    frame: u64,
    cursor_captured: bool,
    weapon_visible: bool,
}

impl<B, W> Session<B, W>
where
    B: RigidBody,
    W: GroundQuery,
{
    /// Create a session, validating both configs up front.
    pub fn new(config: SessionConfig, body: B, world: W) -> Result<Self, SessionError> {
        if config.tick_rate == 0 {
            return Err(SessionError::ZeroTickRate);
        }
        let controller = MotionController::new(config.motion.clone())?;
        let camera = CameraRig::new(config.camera.clone())?;

        Ok(Self {
            config,
            sampler: InputSampler::new(),
            controller,
            camera,
            body,
            world,
            accumulator: 0.0,
            frame: 0,
            cursor_captured: true,
            weapon_visible: true,
        })
    }

    /// Advance one rendered frame of wall-clock duration `frame_dt`.
    pub fn frame(&mut self, raw: &RawInput, frame_dt: f32, hooks: &mut dyn PlatformHooks) {
        let snapshot = self.sampler.sample(raw);
        self.controller.capture(&snapshot.to_command());

        if snapshot.escape_pressed {
            self.cursor_captured = !self.cursor_captured;
            hooks.set_cursor_captured(self.cursor_captured);
            log::debug!("cursor captured: {}", self.cursor_captured);
        }
        if snapshot.fire_pressed {
            self.weapon_visible = !self.weapon_visible;
            hooks.set_weapon_visible(self.weapon_visible);
        }

        let fixed_dt = self.config.delta_time();
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DELTA);
        while self.accumulator >= fixed_dt {
            self.controller
                .fixed_step(&mut self.body, &self.world, fixed_dt);
            self.body.step(fixed_dt);
            self.accumulator -= fixed_dt;
        }

        // Camera last, so it reads post-physics flags and position.
        let camera_frame = CameraFrame {
            look_delta: snapshot.look_delta,
            move_axis: snapshot.move_axis,
            grounded: self.controller.is_grounded(),
            sliding: self.controller.is_sliding(),
            sprinting: snapshot.sprint_held,
        };
        self.camera
            .frame_update(&camera_frame, &mut self.body, frame_dt);

        self.frame += 1;
    }

    /// The motion controller (read-only state accessors live on it).
    pub fn controller(&self) -> &MotionController {
        &self.controller
    }

    /// The camera rig.
    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    /// The character's rigid body.
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Frames processed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Whether the cursor is currently captured.
    pub fn cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    /// Whether the weapon model is currently visible.
    pub fn weapon_visible(&self) -> bool {
        self.weapon_visible
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Keys;
    use crate::world::{FlatWorld, KinematicBody};
    use glam::{Vec2, Vec3};

    const FRAME_DT: f32 = 0.02; // matches the 50 Hz tick exactly

    fn session() -> Session<KinematicBody, FlatWorld> {
        let body = KinematicBody::new(Vec3::ZERO, 0.0);
        let world = FlatWorld::new(0.0);
        Session::new(SessionConfig::default(), body, world).unwrap()
    }

    fn raw(keys: Keys) -> RawInput {
        RawInput {
            keys,
            mouse_delta: Vec2::ZERO,
        }
    }

    fn run(session: &mut Session<KinematicBody, FlatWorld>, keys: Keys, frames: usize) {
        for _ in 0..frames {
            session.frame(&raw(keys), FRAME_DT, &mut NullHooks);
        }
    }

    #[test]
    fn test_zero_tick_rate_is_rejected() {
        let config = SessionConfig {
            tick_rate: 0,
            ..Default::default()
        };
        let result = Session::new(config, KinematicBody::new(Vec3::ZERO, 0.0), FlatWorld::new(0.0));
        assert!(matches!(result, Err(SessionError::ZeroTickRate)));
    }

    #[test]
    fn test_walking_moves_the_body() {
        let mut session = session();
        let mut keys = Keys::default();
        keys.press(Keys::FORWARD);

        run(&mut session, keys, 50); // one second

        let position = session.body().position();
        assert!(position.x > 1.0, "body should have moved forward, at {position:?}");
        assert!(session.controller().is_grounded());
    }

    #[test]
    fn test_short_frame_runs_no_fixed_step_but_updates_camera() {
        let mut session = session();
        let mut keys = Keys::default();
        keys.press(Keys::SPRINT);

        // A frame far shorter than the fixed timestep.
        session.frame(&raw(keys), 0.001, &mut NullHooks);

        assert_eq!(session.body().position(), Vec3::ZERO);
        // FOV easing still ran this frame.
        assert!(session.camera().pose().current_fov > session.camera().config().base_fov);
    }

    #[test]
    fn test_long_frame_runs_multiple_fixed_steps() {
        let mut session = session();
        let mut keys = Keys::default();
        keys.press(Keys::FORWARD);

        // One 100ms frame = five 20ms fixed steps.
        session.frame(&raw(keys), 0.1, &mut NullHooks);
        let single_burst = session.body().position().x;

        let mut other = self::session();
        for _ in 0..5 {
            other.frame(&raw(keys), FRAME_DT, &mut NullHooks);
        }

        assert!(single_burst > 0.0);
        assert!(
            (single_burst - other.body().position().x).abs() < 1e-4,
            "fixed stepping must not depend on frame slicing"
        );
    }

    #[test]
    fn test_jump_fires_once_across_rate_mismatch() {
        let mut session = session();

        // Let the controller pick up the grounded flag first.
        run(&mut session, Keys::default(), 2);
        assert!(session.controller().is_grounded());

        let mut keys = Keys::default();
        keys.press(Keys::JUMP);

        // One captured frame spanning two fixed steps: the impulse fires on
        // the first, and gravity pulls it back below jump_force by the
        // second. It must not be re-applied.
        session.frame(&raw(keys), FRAME_DT * 2.0, &mut NullHooks);

        let vy = session.body().linear_velocity().y;
        let jump_force = session.controller().config().jump_force;
        assert!(vy > 0.0, "should be ascending");
        assert!(vy < jump_force, "impulse fired more than once: vy={vy}");
    }

    #[test]
    fn test_slide_lowers_camera_and_ends() {
        let mut session = session();

        // Build up speed first so the slide boost engages.
        let mut forward = Keys::default();
        forward.press(Keys::FORWARD);
        run(&mut session, forward, 50);
        assert!(session.controller().state().horizontal_speed() > 10.0);

        // Hold slide (movement keys released; the boost does not need them).
        let mut sliding = Keys::default();
        sliding.press(Keys::SLIDE);
        run(&mut session, sliding, 10);
        assert!(session.controller().is_sliding());
        assert!(
            session.camera().pose().offset_y < session.camera().config().midpoint,
            "slide should lower the camera"
        );

        // Keep holding: natural expiry at slide_duration / 2 (0.75s = 38
        // steps) ends it.
        run(&mut session, sliding, 50);
        assert!(!session.controller().is_sliding());
        assert_eq!(session.controller().state().horizontal_velocity().length(), 0.0);
    }

    #[test]
    fn test_escape_and_fire_toggle_hooks() {
        #[derive(Default)]
        struct Recorder {
            cursor: Vec<bool>,
            weapon: Vec<bool>,
        }
        impl PlatformHooks for Recorder {
            fn set_cursor_captured(&mut self, captured: bool) {
                self.cursor.push(captured);
            }
            fn set_weapon_visible(&mut self, visible: bool) {
                self.weapon.push(visible);
            }
        }

        let mut session = session();
        let mut hooks = Recorder::default();

        let mut keys = Keys::default();
        keys.press(Keys::ESCAPE);
        keys.press(Keys::FIRE);
        session.frame(&raw(keys), FRAME_DT, &mut hooks);

        // Held keys produce no further edges.
        session.frame(&raw(keys), FRAME_DT, &mut hooks);

        assert_eq!(hooks.cursor, vec![false]);
        assert_eq!(hooks.weapon, vec![false]);
        assert!(!session.cursor_captured());
        assert!(!session.weapon_visible());
    }

    #[test]
    fn test_camera_reads_post_physics_grounded_flag() {
        let mut session = session();
        let mut keys = Keys::default();
        keys.press(Keys::FORWARD);

        run(&mut session, keys, 10);

        // Walking on the ground: the bob engaged this frame, which requires
        // the camera to have observed the grounded flag set by this frame's
        // fixed steps.
        assert!(session.camera().pose().bob_phase > 0.0);
    }

    #[test]
    fn test_frame_counter_advances() {
        let mut session = session();
        run(&mut session, Keys::default(), 3);
        assert_eq!(session.frame_count(), 3);
    }
}
