//! Slipstream session layer.
//!
//! Glues the variable-rate and fixed-rate halves of the locomotion core
//! together:
//!
//! - Input sampling with edge detection ([`input`])
//! - The per-frame session loop with its fixed-timestep accumulator
//!   ([`session`])
//! - A flat-ground demo environment implementing the physics capability
//!   traits ([`world`])
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Session frame                        │
//! │  ┌─────────┐   ┌─────────────────────┐   ┌───────────────┐   │
//! │  │ Input   │──►│ MotionController    │──►│ CameraRig     │   │
//! │  │ sampler │   │ (0..n fixed steps)  │   │ (reads flags) │   │
//! │  └─────────┘   └─────────────────────┘   └───────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod input;
pub mod session;
pub mod world;

pub use input::{InputSampler, InputSnapshot, Keys, RawInput};
pub use session::{NullHooks, PlatformHooks, Session, SessionConfig, SessionError};
pub use world::{FlatWorld, KinematicBody};

// Re-export core types for convenience
pub use slipstream_camera::{CameraConfig, CameraFrame, CameraPose, CameraRig};
pub use slipstream_physics::{
    CharacterState, GroundQuery, LayerMask, MotionConfig, MotionController, MoveCommand, RigidBody,
};
