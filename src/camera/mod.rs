//! Orbit camera: spherical state, derived matrices, and gesture handling.
//!
//! [`Orbit`] holds the spherical pose (target, radius, yaw, pitch) and knows
//! how to convert it to and from a Cartesian eye position. [`CameraUniform`]
//! is the GPU-facing block derived from that pose. [`OrbitController`] owns
//! both, applies gesture deltas, and pushes every change through a
//! caller-supplied sink.

/// Orbit pose and the GPU uniform block derived from it.
pub mod core;

/// Controller tying pose, gestures, and the uniform sink together.
pub mod controller;

/// Gesture state machine turning raw input events into camera actions.
pub mod gesture;

pub use controller::{OrbitController, UniformSink};
pub use gesture::{CameraAction, Gesture, GestureTracker};
pub use self::core::{CameraUniform, Orbit};
