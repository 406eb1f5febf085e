//! Spherical orbit pose and the uniform block derived from it.

use glam::{Mat4, Vec3, Vec4};

/// Vertical field of view in radians.
pub const FOVY: f32 = std::f32::consts::FRAC_PI_4;

/// Near clip plane distance.
pub const ZNEAR: f32 = 0.1;

/// Far clip plane distance.
pub const ZFAR: f32 = 1000.0;

/// Margin keeping pitch away from the poles, in radians.
///
/// At exactly +-pi/2 the view direction becomes parallel to the world up
/// vector and the view basis collapses, so rotation clamps pitch to
/// +-([`PITCH_LIMIT`]) instead.
pub const PITCH_EPSILON: f32 = 0.01;

/// Greatest magnitude pitch may reach through rotation.
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - PITCH_EPSILON;

/// Camera pose in spherical coordinates around a look-at target.
///
/// The eye position is never stored; it is always derived from the four
/// fields below, so there is a single source of truth for the pose. Yaw is
/// measured around the +Y axis with zero on the +Z side of the target, and
/// pitch is the elevation above the target's horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    /// Point the camera looks at, as a homogeneous position (w = 1).
    pub target: Vec4,
    /// Distance from the eye to the target.
    pub radius: f32,
    /// Azimuth around +Y in radians.
    pub yaw: f32,
    /// Elevation above the target plane in radians.
    pub pitch: f32,
}

impl Orbit {
    /// Derives a spherical pose from a Cartesian eye position and target.
    ///
    /// The w components of both arguments are ignored; the stored target is
    /// re-homogenized with w = 1. If `position` coincides with `target` the
    /// pose degenerates to radius 0 with yaw and pitch 0, which later zoom
    /// clamping recovers from.
    #[must_use]
    pub fn from_pose(position: Vec4, target: Vec4) -> Self {
        let offset = position.truncate() - target.truncate();
        let radius = offset.length();
        let yaw = offset.x.atan2(offset.z);
        // The ratio can drift just past 1.0 for poses straight above or
        // below the target, which would make asin return NaN.
        let pitch = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        Self {
            target: target.truncate().extend(1.0),
            radius,
            yaw,
            pitch,
        }
    }

    /// Eye position reconstructed from the spherical fields, with w = 1.
    #[must_use]
    pub fn position(&self) -> Vec4 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let offset = Vec3::new(
            self.radius * sin_yaw * cos_pitch,
            self.radius * sin_pitch,
            self.radius * cos_yaw * cos_pitch,
        );
        (self.target.truncate() + offset).extend(1.0)
    }

    /// Right-handed view matrix looking from the eye toward the target.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            self.position().truncate(),
            self.target.truncate(),
            Vec3::Y,
        )
    }
}

/// GPU-facing camera block, 72 floats / 288 bytes.
///
/// Matrices are stored row-major (transposed from glam's column-major
/// layout), so shaders multiply with the vector on the left. The pose half
/// (`position`, `target`, `view`, `inv_view`) and the projection half
/// (`proj`, `inv_proj`) update independently: a resize rewrites only the
/// projection bytes and a camera move rewrites only the pose bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// Eye position, w = 1.
    pub position: [f32; 4],
    /// Look-at target, w = 1.
    pub target: [f32; 4],
    /// View matrix, row-major.
    pub view: [[f32; 4]; 4],
    /// Perspective projection matrix, row-major.
    pub proj: [[f32; 4]; 4],
    /// Inverse view matrix, row-major.
    pub inv_view: [[f32; 4]; 4],
    /// Inverse projection matrix, row-major.
    pub inv_proj: [[f32; 4]; 4],
}

const _: () = assert!(size_of::<CameraUniform>() == 288);

impl CameraUniform {
    /// Block with identity matrices and both points at the origin (w = 1).
    #[must_use]
    pub fn new() -> Self {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        Self {
            position: [0.0, 0.0, 0.0, 1.0],
            target: [0.0, 0.0, 0.0, 1.0],
            view: identity,
            proj: identity,
            inv_view: identity,
            inv_proj: identity,
        }
    }

    /// Rewrites the pose half of the block from an orbit pose.
    ///
    /// `proj` and `inv_proj` are left bit-for-bit untouched.
    pub fn update_pose(&mut self, orbit: &Orbit) {
        let view = orbit.view_matrix();
        self.position = orbit.position().to_array();
        self.target = orbit.target.to_array();
        self.view = view.transpose().to_cols_array_2d();
        self.inv_view = view.inverse().transpose().to_cols_array_2d();
    }

    /// Rewrites the projection half of the block for a new aspect ratio.
    ///
    /// The pose half is left bit-for-bit untouched, so resizing the surface
    /// never perturbs the view matrices.
    pub fn update_projection(&mut self, aspect: f32) {
        let proj = Mat4::perspective_rh(FOVY, aspect, ZNEAR, ZFAR);
        self.proj = proj.transpose().to_cols_array_2d();
        self.inv_proj = proj.inverse().transpose().to_cols_array_2d();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
