//! Flat-ground demo environment.
//!
//! Minimal implementations of the physics capability traits so the
//! locomotion core can run headlessly: an infinite flat ground plane and a
//! semi-implicit Euler body integrator. This is a test arena, not a physics
//! engine; real deployments supply their own engine behind the same traits.

use std::f32::consts::TAU;

use glam::Vec3;

use slipstream_physics::{ForceMode, GroundQuery, LayerMask, RigidBody, STANDARD_GRAVITY};

/// Infinite horizontal plane on a configurable layer.
#[derive(Debug, Clone)]
pub struct FlatWorld {
    /// Height of the walkable surface.
    pub ground_height: f32,

    /// Layer the surface lives on.
    pub layers: LayerMask,
}

impl FlatWorld {
    /// Flat ground at `height` on the GROUND layer.
    pub fn new(height: f32) -> Self {
        Self {
            ground_height: height,
            layers: LayerMask::GROUND,
        }
    }
}

impl GroundQuery for FlatWorld {
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool {
        mask.intersects(self.layers) && center.y - radius <= self.ground_height
    }
}

/// Demo rigid body: semi-implicit Euler with built-in gravity, linear
/// damping, and a floor clamp against the demo plane.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    position: Vec3,
    velocity: Vec3,
    damping: f32,
    yaw: f32,
    mass: f32,
    floor: f32,
    pending_accel: Vec3,
    pending_force: Vec3,
}

impl KinematicBody {
    /// Body at `position` resting against a floor plane at `floor`.
    pub fn new(position: Vec3, floor: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            damping: 0.0,
            yaw: 0.0,
            mass: 80.0,
            floor,
            pending_accel: Vec3::ZERO,
            pending_force: Vec3::ZERO,
        }
    }
}

impl RigidBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn linear_velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn set_linear_damping(&mut self, damping: f32) {
        self.damping = damping.max(0.0);
    }

    fn add_force(&mut self, force: Vec3, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.pending_force += force,
            ForceMode::Acceleration => self.pending_accel += force,
        }
    }

    fn yaw(&self) -> f32 {
        self.yaw
    }

    fn apply_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta).rem_euclid(TAU);
    }

    fn step(&mut self, dt: f32) {
        let acceleration =
            Vec3::NEG_Y * STANDARD_GRAVITY + self.pending_accel + self.pending_force / self.mass;
        self.pending_accel = Vec3::ZERO;
        self.pending_force = Vec3::ZERO;

        self.velocity += acceleration * dt;
        self.velocity /= 1.0 + self.damping * dt;
        self.position += self.velocity * dt;

        // Floor clamp: stop downward motion at the demo plane.
        if self.position.y < self.floor {
            self.position.y = self.floor;
            self.velocity.y = self.velocity.y.max(0.0);
        }
    }
}
