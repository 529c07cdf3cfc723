//! Ground contact detection.

use glam::Vec3;

use crate::body::{GroundQuery, LayerMask};

/// Fixed-shape ground probe.
///
/// Runs a sphere-overlap test at a fixed offset below the body origin, once
/// per fixed step. The result replaces the grounded flag unconditionally:
/// there is no debounce or hysteresis, so rapid contact flicker (stair
/// edges, steep slopes) shows through to consumers. That is a known,
/// deliberate limitation of this controller family.
#[derive(Debug, Clone)]
pub struct GroundProbe {
    radius: f32,
    distance: f32,
    mask: LayerMask,
    warned_empty_mask: bool,
}

impl GroundProbe {
    /// Create a probe with the given sphere radius, downward offset, and
    /// walkable-layer mask.
    pub fn new(radius: f32, distance: f32, mask: LayerMask) -> Self {
        Self {
            radius,
            distance,
            mask,
            warned_empty_mask: false,
        }
    }

    /// Run the overlap test below `origin`.
    ///
    /// A query against an empty mask can never hit anything; it degrades to
    /// "not grounded" and logs a warning the first time instead of failing.
    pub fn check(&mut self, world: &impl GroundQuery, origin: Vec3) -> bool {
        if self.mask.is_empty() {
            if !self.warned_empty_mask {
                log::warn!("ground probe has an empty layer mask; always reporting airborne");
                self.warned_empty_mask = true;
            }
            return false;
        }

        let center = origin - Vec3::Y * self.distance;
        world.overlap_sphere(center, self.radius, self.mask)
    }
}
