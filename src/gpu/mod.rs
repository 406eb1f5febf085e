//! GPU resource management.
//!
//! Provides wgpu device/surface initialization, the camera uniform binding,
//! and the depth attachment.

/// Camera uniform buffer, bind group layout, and bind group.
pub mod camera_binding;
/// wgpu device, surface, and queue initialization.
pub mod context;
/// Depth attachment texture.
pub mod texture;

pub use camera_binding::CameraBinding;
pub use context::{GpuContext, GpuContextError};
pub use texture::DepthTexture;
