//! CPU-side mesh data and the procedural teapot model.

/// Procedural teapot built from a lathe and two swept tubes.
pub mod teapot;

use bytemuck::{Pod, Zeroable};

/// Vertex format shared by every mesh in the crate: position + normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Vertex buffer layout matching the shader's `@location(0)`/`@location(1)`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle list with 32-bit indices.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    /// Deduplicated vertices.
    pub vertices: Vec<Vertex>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: glam::Vec3, normal: glam::Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        index
    }

    /// Appends one triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(size_of::<Vertex>(), 24);
        assert_eq!(Vertex::layout().array_stride, 24);
    }

    #[test]
    fn attribute_offsets_match_field_order() {
        let layout = Vertex::layout();
        assert_eq!(layout.attributes[0].offset, 0);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(layout.attributes[1].offset, 12);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }

    #[test]
    fn push_vertex_returns_sequential_indices() {
        let mut mesh = MeshData::new();
        let a = mesh.push_vertex(glam::Vec3::ZERO, glam::Vec3::Y);
        let b = mesh.push_vertex(glam::Vec3::X, glam::Vec3::Y);
        assert_eq!((a, b), (0, 1));
        mesh.push_triangle(a, b, a);
        assert_eq!(mesh.triangle_count(), 1);
    }
}
