//! Slipstream camera.
//!
//! The variable-rate half of the locomotion core: mouse look, head bob,
//! slide-induced vertical offset, and field-of-view easing. The rig is
//! driven once per rendered frame, after physics, from the motion
//! controller's read-only grounded/sliding flags and the frame's pointer
//! delta. Rendering itself lives elsewhere; this crate only produces the
//! camera's local transform and field of view.

pub mod rig;

pub use rig::{CameraConfig, CameraConfigError, CameraFrame, CameraPose, CameraRig};
