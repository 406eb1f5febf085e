//! Frame timing with smoothed FPS reporting.

use web_time::Instant;

/// Tracks frame-to-frame time and keeps an exponentially smoothed FPS.
pub struct FrameTiming {
    last_frame: Instant,
    smoothed_fps: f32,
    frames: u32,
}

impl FrameTiming {
    /// Weight of the newest sample in the moving average.
    const SMOOTHING: f32 = 0.05;
    /// Frames between periodic rate logs.
    const LOG_INTERVAL: u32 = 300;

    /// Timer starting from now with a neutral 60 fps estimate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            frames: 0,
        }
    }

    /// Call once per presented frame. Periodically logs the smoothed rate.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - Self::SMOOTHING)
                + instant_fps * Self::SMOOTHING;
        }

        self.frames = self.frames.wrapping_add(1);
        if self.frames % Self::LOG_INTERVAL == 0 {
            log::debug!("{:.1} fps", self.smoothed_fps);
        }
    }

    /// Current smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new()
    }
}
