//! Small shared utilities.

/// Frame timing with smoothed FPS reporting.
pub mod frame_timing;

pub use frame_timing::FrameTiming;
