//! Runtime options with TOML preset support.
//!
//! Everything tweakable from outside the binary (window shape, initial
//! camera framing, zoom limits) lives here. Options serialize to/from TOML;
//! all structs use `#[serde(default)]` so a partial file overriding a single
//! field still parses.

use std::path::Path;

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::TeaviewError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Window title and initial size.
    pub window: WindowOptions,
    /// Initial camera framing and interaction limits.
    pub camera: CameraOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TeaviewError::Io`] if the file cannot be read and
    /// [`TeaviewError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, TeaviewError> {
        let content = std::fs::read_to_string(path).map_err(TeaviewError::Io)?;
        toml::from_str(&content).map_err(|e| TeaviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`TeaviewError::Io`] if the file or its parent directory
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), TeaviewError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| TeaviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TeaviewError::Io)?;
        }
        std::fs::write(path, content).map_err(TeaviewError::Io)
    }
}

/// Window title and initial size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowOptions {
    /// Title bar text.
    pub title: String,
    /// Initial logical width in pixels.
    pub width: u32,
    /// Initial logical height in pixels.
    pub height: u32,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            title: "teaview".to_owned(),
            width: 1280,
            height: 720,
        }
    }
}

/// Initial camera framing and interaction limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Initial eye position in world space.
    pub position: [f32; 3],
    /// Point the camera orbits around.
    pub target: [f32; 3],
    /// Closest the eye may zoom toward the target.
    pub min_radius: f32,
    /// Farthest the eye may zoom away from the target.
    pub max_radius: f32,
    /// Flip the drag-to-rotate direction.
    pub invert_drag: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [3.2, 2.2, 3.2],
            target: [0.0, 0.0, 0.0],
            min_radius: 1.0,
            max_radius: 100.0,
            invert_drag: false,
        }
    }
}

impl CameraOptions {
    /// Initial eye position as a homogeneous point (w = 1).
    #[must_use]
    pub fn position_point(&self) -> Vec4 {
        Vec3::from_array(self.position).extend(1.0)
    }

    /// Orbit target as a homogeneous point (w = 1).
    #[must_use]
    pub fn target_point(&self) -> Vec4 {
        Vec3::from_array(self.target).extend(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn default_camera_orbits_the_origin() {
        let opts = CameraOptions::default();
        assert_eq!(opts.target, [0.0, 0.0, 0.0]);
        assert_eq!(opts.min_radius, 1.0);
        assert_eq!(opts.max_radius, 100.0);
        assert!(!opts.invert_drag);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[camera]
max_radius = 40.0
min_radius = 8.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.camera.max_radius, 40.0);
        assert_eq!(opts.camera.min_radius, 8.0);
        // Everything else should be default
        assert_eq!(opts.camera.position, [3.2, 2.2, 3.2]);
        assert_eq!(opts.window.width, 1280);
    }

    #[test]
    fn homogeneous_helpers_fix_w_at_one() {
        let opts = CameraOptions {
            position: [-10.0, 4.0, -8.0],
            target: [0.0, 1.0, 0.0],
            ..CameraOptions::default()
        };
        assert_eq!(opts.position_point(), Vec4::new(-10.0, 4.0, -8.0, 1.0));
        assert_eq!(opts.target_point(), Vec4::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn garbage_toml_reports_a_parse_error() {
        let result: Result<Options, _> = toml::from_str("window = 3");
        assert!(result.is_err());
    }
}
