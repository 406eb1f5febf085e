//! Procedural teapot: a lathed body and lid, a swept spout, and a handle.
//!
//! The whole model is generated at startup from a handful of curves, so the
//! binary ships no mesh assets. The body is a surface of revolution around
//! +Y; the spout is a tapered tube swept along a quadratic Bezier; the
//! handle is a constant-radius tube swept along a circular arc. Tube ends
//! that sit inside the body are left open, the pour lip gets a cap.

use glam::{Vec2, Vec3};

use super::MeshData;

/// Ring resolution used by [`generate`] callers that have no opinion.
pub const DEFAULT_SEGMENTS: u32 = 48;

/// Profile radii at or below this are poles and collapse to a fan.
const POLE_RADIUS: f32 = 1e-5;

/// Body and lid silhouette as (radius, height) pairs, bottom to top.
/// Both ends sit on the axis so the lathe closes itself.
const BODY_PROFILE: [(f32, f32); 16] = [
    (0.00, 0.00),
    (0.50, 0.00),
    (0.78, 0.08),
    (0.94, 0.25),
    (1.00, 0.56),
    (0.94, 0.90),
    (0.80, 1.15),
    (0.64, 1.30),
    (0.58, 1.34),
    (0.52, 1.38),
    (0.38, 1.46),
    (0.20, 1.54),
    (0.12, 1.62),
    (0.16, 1.70),
    (0.10, 1.78),
    (0.00, 1.82),
];

const SPOUT_ROOT: Vec3 = Vec3::new(0.70, 0.50, 0.0);
const SPOUT_CONTROL: Vec3 = Vec3::new(1.50, 0.70, 0.0);
const SPOUT_TIP: Vec3 = Vec3::new(1.75, 1.20, 0.0);
const SPOUT_ROOT_RADIUS: f32 = 0.16;
const SPOUT_TIP_RADIUS: f32 = 0.07;
const SPOUT_STEPS: u32 = 12;

const HANDLE_CENTER: Vec2 = Vec2::new(-0.95, 0.85);
const HANDLE_ARC_RADIUS: f32 = 0.45;
const HANDLE_TUBE_RADIUS: f32 = 0.07;
const HANDLE_STEPS: u32 = 16;

/// Builds the teapot with the given ring resolution (clamped to at least 3).
#[must_use]
pub fn generate(segments: u32) -> MeshData {
    let segments = segments.max(3);
    let mut mesh = MeshData::new();
    lathe(&mut mesh, &BODY_PROFILE, segments);
    spout(&mut mesh, segments);
    handle(&mut mesh, segments);
    mesh
}

/// Revolves a (radius, height) profile around +Y.
///
/// Vertex normals come from the 2D profile tangent rotated a quarter turn,
/// so they follow the silhouette instead of the faceting. Quads touching a
/// pole ring drop their degenerate triangle and become a fan.
fn lathe(mesh: &mut MeshData, profile: &[(f32, f32)], segments: u32) {
    let base = mesh.vertices.len() as u32;

    let mut slopes = Vec::with_capacity(profile.len());
    for i in 0..profile.len() {
        let prev = profile[i.saturating_sub(1)];
        let next = profile[(i + 1).min(profile.len() - 1)];
        let tangent = Vec2::new(next.0 - prev.0, next.1 - prev.1).normalize_or_zero();
        slopes.push(Vec2::new(tangent.y, -tangent.x));
    }

    for (&(radius, height), slope) in profile.iter().zip(&slopes) {
        for k in 0..segments {
            let theta = k as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = theta.sin_cos();
            let radial = Vec3::new(cos, 0.0, sin);
            let position = radial * radius + Vec3::Y * height;
            let normal = (radial * slope.x + Vec3::Y * slope.y).normalize_or_zero();
            let _ = mesh.push_vertex(position, normal);
        }
    }

    for i in 0..profile.len() - 1 {
        let lower_solid = profile[i].0 > POLE_RADIUS;
        let upper_solid = profile[i + 1].0 > POLE_RADIUS;
        let ring_a = base + i as u32 * segments;
        let ring_b = ring_a + segments;
        for k in 0..segments {
            let k_next = (k + 1) % segments;
            let v0 = ring_a + k;
            let v1 = ring_a + k_next;
            let v2 = ring_b + k;
            let v3 = ring_b + k_next;
            if lower_solid {
                mesh.push_triangle(v0, v2, v1);
            }
            if upper_solid {
                mesh.push_triangle(v1, v2, v3);
            }
        }
    }
}

/// A sweep path sample: ring center and ring radius.
struct PathPoint {
    center: Vec3,
    radius: f32,
}

/// Sweeps a circular cross-section along a path of ring centers.
///
/// Ring frames are parallel-transported: each step re-projects the previous
/// frame normal onto the plane perpendicular to the new tangent, which keeps
/// consecutive rings from twisting against each other.
fn sweep(mesh: &mut MeshData, path: &[PathPoint], segments: u32, cap_end: bool) {
    if path.len() < 2 {
        return;
    }
    let base = mesh.vertices.len() as u32;

    let mut normal = perpendicular(tangent_at(path, 0));
    for i in 0..path.len() {
        let tangent = tangent_at(path, i);
        normal = (normal - tangent * normal.dot(tangent)).normalize_or_zero();
        if normal.length_squared() < 0.5 {
            normal = perpendicular(tangent);
        }
        let binormal = normal.cross(tangent);
        for k in 0..segments {
            let phi = k as f32 / segments as f32 * std::f32::consts::TAU;
            let (sin, cos) = phi.sin_cos();
            let dir = normal * cos + binormal * sin;
            let _ = mesh.push_vertex(path[i].center + dir * path[i].radius, dir);
        }
    }

    for i in 0..path.len() as u32 - 1 {
        let ring_a = base + i * segments;
        let ring_b = ring_a + segments;
        for k in 0..segments {
            let k_next = (k + 1) % segments;
            let v0 = ring_a + k;
            let v1 = ring_a + k_next;
            let v2 = ring_b + k;
            let v3 = ring_b + k_next;
            mesh.push_triangle(v0, v2, v1);
            mesh.push_triangle(v1, v2, v3);
        }
    }

    if cap_end {
        let last = path.len() - 1;
        let tangent = tangent_at(path, last);
        let ring = base + last as u32 * segments;
        let center = mesh.push_vertex(path[last].center, tangent);
        for k in 0..segments {
            let k_next = (k + 1) % segments;
            mesh.push_triangle(center, ring + k_next, ring + k);
        }
    }
}

fn tangent_at(path: &[PathPoint], i: usize) -> Vec3 {
    let ahead = (i + 1).min(path.len() - 1);
    let behind = i.saturating_sub(1);
    (path[ahead].center - path[behind].center).normalize_or_zero()
}

fn perpendicular(tangent: Vec3) -> Vec3 {
    let axis = if tangent.y.abs() > 0.9 { Vec3::X } else { Vec3::Y };
    axis.cross(tangent).normalize_or_zero()
}

fn spout(mesh: &mut MeshData, segments: u32) {
    let ring = (segments / 2).max(3);
    let path: Vec<PathPoint> = (0..=SPOUT_STEPS)
        .map(|i| {
            let t = i as f32 / SPOUT_STEPS as f32;
            PathPoint {
                center: bezier(SPOUT_ROOT, SPOUT_CONTROL, SPOUT_TIP, t),
                radius: SPOUT_ROOT_RADIUS + (SPOUT_TIP_RADIUS - SPOUT_ROOT_RADIUS) * t,
            }
        })
        .collect();
    sweep(mesh, &path, ring, true);
}

fn handle(mesh: &mut MeshData, segments: u32) {
    let ring = (segments / 2).max(3);
    // Arc ends at 60 / 300 degrees sit inside the body wall; the bulge at
    // 180 degrees is the grip.
    let start = 60.0_f32.to_radians();
    let end = 300.0_f32.to_radians();
    let path: Vec<PathPoint> = (0..=HANDLE_STEPS)
        .map(|i| {
            let t = i as f32 / HANDLE_STEPS as f32;
            let alpha = start + (end - start) * t;
            let (sin, cos) = alpha.sin_cos();
            PathPoint {
                center: Vec3::new(
                    HANDLE_CENTER.x + HANDLE_ARC_RADIUS * cos,
                    HANDLE_CENTER.y + HANDLE_ARC_RADIUS * sin,
                    0.0,
                ),
                radius: HANDLE_TUBE_RADIUS,
            }
        })
        .collect();
    sweep(mesh, &path, ring, false);
}

fn bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    p0 * (u * u) + p1 * (2.0 * u * t) + p2 * (t * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_mesh_is_well_formed() {
        let mesh = generate(24);
        assert!(!mesh.vertices.is_empty());
        assert_eq!(mesh.indices.len() % 3, 0);
        let max = mesh.vertices.len() as u32;
        assert!(
            mesh.indices.iter().all(|&i| i < max),
            "index out of bounds"
        );
    }

    #[test]
    fn vertex_normals_are_unit_length() {
        let mesh = generate(24);
        for vertex in &mesh.vertices {
            let len = Vec3::from_array(vertex.normal).length();
            assert!((len - 1.0).abs() < 1e-3, "normal length {len}");
        }
    }

    #[test]
    fn triangles_wind_outward() {
        let mesh = generate(24);
        let mut checked = 0_u32;
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = Vec3::from_array(mesh.vertices[a].position);
            let pb = Vec3::from_array(mesh.vertices[b].position);
            let pc = Vec3::from_array(mesh.vertices[c].position);
            let face = (pb - pa).cross(pc - pa);
            if face.length_squared() < 1e-12 {
                continue;
            }
            let outward = Vec3::from_array(mesh.vertices[a].normal)
                + Vec3::from_array(mesh.vertices[b].normal)
                + Vec3::from_array(mesh.vertices[c].normal);
            assert!(
                face.dot(outward) > 0.0,
                "triangle ({a},{b},{c}) winds against its vertex normals"
            );
            checked += 1;
        }
        assert!(checked > 500, "only {checked} triangles checked");
    }

    #[test]
    fn spout_and_handle_extend_past_the_body() {
        let mesh = generate(24);
        let max_x = mesh
            .vertices
            .iter()
            .fold(f32::MIN, |acc, v| acc.max(v.position[0]));
        let min_x = mesh
            .vertices
            .iter()
            .fold(f32::MAX, |acc, v| acc.min(v.position[0]));
        assert!(max_x > 1.5, "spout missing: max x {max_x}");
        assert!(min_x < -1.2, "handle missing: min x {min_x}");
    }

    #[test]
    fn model_sits_on_the_ground_plane() {
        let mesh = generate(24);
        let min_y = mesh
            .vertices
            .iter()
            .fold(f32::MAX, |acc, v| acc.min(v.position[1]));
        let max_y = mesh
            .vertices
            .iter()
            .fold(f32::MIN, |acc, v| acc.max(v.position[1]));
        assert!(min_y >= -1e-4, "model dips below ground: {min_y}");
        assert!(max_y <= 1.9, "model too tall: {max_y}");
    }

    #[test]
    fn segment_count_scales_vertex_count() {
        let coarse = generate(12);
        let fine = generate(48);
        assert!(fine.vertices.len() > coarse.vertices.len());
        assert!(fine.triangle_count() > coarse.triangle_count());
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate(16);
        let b = generate(16);
        assert_eq!(a.vertices, b.vertices);
        assert_eq!(a.indices, b.indices);
    }
}
