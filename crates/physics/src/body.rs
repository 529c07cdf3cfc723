//! External physics capabilities consumed by the locomotion core.
//!
//! The controller does not integrate positions or resolve collisions itself.
//! It drives an externally owned rigid body (velocity, damping, forces) and
//! asks an externally owned world whether the character touches ground.
//! Both are expressed as traits so the core can run against a real physics
//! engine, the in-crate demo world, or a test stub.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Collision layer bitmask for ground-overlap queries.
///
/// Layers follow the same const-bitset convention as the movement flags:
/// each layer is a bit, masks are OR-combinations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Matches nothing. Queries against this mask always miss.
    pub const NONE: LayerMask = LayerMask(0);

    /// Walkable ground geometry.
    pub const GROUND: LayerMask = LayerMask(1 << 0);

    /// Static world geometry that is not walkable (walls, ceilings).
    pub const WORLD: LayerMask = LayerMask(1 << 1);

    /// Dynamic props.
    pub const PROPS: LayerMask = LayerMask(1 << 2);

    /// Check whether any layer is shared between the two masks.
    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        (self.0 & other.0) != 0
    }

    /// Check whether the mask matches no layers at all.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two masks.
    #[inline]
    pub fn with(self, other: LayerMask) -> LayerMask {
        LayerMask(self.0 | other.0)
    }
}

/// How a force passed to [`RigidBody::add_force`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForceMode {
    /// Newtons: divided by mass before integration.
    Force,
    /// Meters/second²: applied as-is, ignoring mass.
    Acceleration,
}

/// Geometric overlap queries against the collision world.
pub trait GroundQuery {
    /// Does a sphere at `center` with `radius` touch any geometry on the
    /// layers in `mask`?
    fn overlap_sphere(&self, center: Vec3, radius: f32, mask: LayerMask) -> bool;
}

/// The character's externally integrated rigid body.
///
/// Position is owned by the physics engine; the controller only reads it.
/// Velocity and damping are mutated by the controller during fixed steps and
/// must not be touched by anything else (see the crate-level concurrency
/// notes). Yaw is the one rotation the camera rig writes.
pub trait RigidBody {
    /// Current world-space position (bottom of the collision volume).
    fn position(&self) -> Vec3;

    /// Current linear velocity (meters/second).
    fn linear_velocity(&self) -> Vec3;

    /// Overwrite the linear velocity.
    fn set_linear_velocity(&mut self, velocity: Vec3);

    /// Set the linear damping coefficient used by the integrator.
    fn set_linear_damping(&mut self, damping: f32);

    /// Queue a force for the next integration step.
    fn add_force(&mut self, force: Vec3, mode: ForceMode);

    /// Body yaw in radians (rotation about +Y), wrapped to `[0, 2π)`.
    fn yaw(&self) -> f32;

    /// Rotate the body about +Y by `delta` radians.
    fn apply_yaw(&mut self, delta: f32);

    /// Advance position and velocity by one fixed step, consuming queued
    /// forces and applying built-in gravity and damping.
    fn step(&mut self, dt: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_intersects() {
        let walkable = LayerMask::GROUND.with(LayerMask::PROPS);
        assert!(walkable.intersects(LayerMask::GROUND));
        assert!(walkable.intersects(LayerMask::PROPS));
        assert!(!walkable.intersects(LayerMask::WORLD));
    }

    #[test]
    fn test_empty_mask_matches_nothing() {
        assert!(LayerMask::NONE.is_empty());
        assert!(!LayerMask::NONE.intersects(LayerMask::GROUND));
        assert!(!LayerMask::GROUND.intersects(LayerMask::NONE));
    }
}
