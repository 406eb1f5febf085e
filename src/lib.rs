// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive orbit-camera teapot viewer built on wgpu.
//!
//! Teaview draws one procedurally generated teapot and lets an orbital
//! camera circle it: drag to rotate, scroll or pinch to zoom. The camera
//! publishes a fixed-layout uniform block through a sink callback on every
//! change, and the render side consumes that block without any per-frame
//! camera work.
//!
//! # Key entry points
//!
//! - [`engine::Engine`] - owns the GPU context, camera, and renderer
//! - [`camera::OrbitController`] - orbit pose, gestures, and the uniform
//!   block
//! - [`mesh::teapot`] - the procedural teapot geometry
//! - [`options::Options`] - runtime configuration (window, camera framing)
//! - [`viewer::Viewer`] - the winit window shell (`viewer` feature)
//!
//! # Architecture
//!
//! Input flows one way: the windowing shell translates platform events
//! into [`input::InputEvent`]s, the controller folds them through a small
//! gesture state machine into pose changes, and every pose change emits
//! the full [`camera::CameraUniform`] block through the sink the engine
//! wired to a GPU buffer upload. Rendering is a single forward pass over
//! the teapot mesh with depth testing.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod mesh;
pub mod options;
pub mod renderer;
pub mod util;

#[cfg(feature = "viewer")]
pub mod viewer;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub mod web;

pub use camera::{CameraUniform, OrbitController};
pub use engine::Engine;
pub use error::TeaviewError;
pub use input::InputEvent;
pub use options::Options;

#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
