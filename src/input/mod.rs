//! Platform-agnostic input events.
//!
//! The windowing layer (native or web) translates its own event types into
//! [`InputEvent`] values before handing them to the engine, so the camera
//! code never sees a window handle or a DOM type.

/// Pointer, scroll, and touch events.
pub mod event;

pub use event::InputEvent;
