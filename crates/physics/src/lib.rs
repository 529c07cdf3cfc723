//! Slipstream locomotion physics.
//!
//! The fixed-rate half of a first-person character controller: velocity
//! planning, the jump impulse, the slide state machine, and drag selection,
//! all driven against an externally integrated rigid body.
//!
//! # Architecture
//!
//! - **Capabilities** ([`body`]): traits for the rigid-body integrator and
//!   the ground-overlap query. The engine behind them is opaque; this crate
//!   never resolves collisions itself.
//! - **Probe** ([`probe`]): fixed-shape ground contact test.
//! - **Controller** ([`motion`]): consumes per-frame commands at the fixed
//!   simulation rate and mutates the body's velocity, damping, and forces.
//!
//! # Rate boundary
//!
//! All state here is advanced at a fixed timestep for determinism. Input
//! arrives at the variable render rate and crosses over as latched,
//! single-consume edge flags (see [`motion::MotionController`]). Everything
//! runs on one logical thread; the camera side only ever reads
//! [`state::CharacterState`] through accessors.

pub mod body;
pub mod config;
pub mod motion;
pub mod probe;
pub mod slide;
pub mod state;

pub use body::{ForceMode, GroundQuery, LayerMask, RigidBody};
pub use config::{ConfigError, MotionConfig};
pub use motion::{MotionController, STANDARD_GRAVITY};
pub use probe::GroundProbe;
pub use slide::SlideTimer;
pub use state::{CharacterState, MoveCommand};
