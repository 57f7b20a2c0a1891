//! Sky Module
//!
//! Skysphere geometry and the colour gradient it is shaded with.
//!
//! The sphere is unit-sized and drawn around the camera with the view
//! translation stripped, so it never gets closer or further away. Its
//! triangles face inward.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Clear colour the sky horizon blends into.
pub const DEFAULT_HORIZON: [f32; 3] = [0.67, 0.84, 0.9];

/// Sky gradient colours
///
/// The sky shader blends `horizon -> zenith` above the horizon and
/// `horizon -> ground` below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkySettings {
    pub zenith: [f32; 3],
    pub horizon: [f32; 3],
    pub ground: [f32; 3],
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            zenith: [0.36, 0.6, 0.85],
            horizon: DEFAULT_HORIZON,
            ground: [0.55, 0.6, 0.62],
        }
    }
}

/// Skysphere vertex (20 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(SkyVertex, [u8; 20]);

impl SkyVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SkyVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Skysphere geometry
#[derive(Debug, Clone)]
pub struct SkyMesh {
    pub vertices: Vec<SkyVertex>,
    pub indices: Vec<u32>,
}

/// Build a unit UV sphere with inward-facing triangles.
///
/// `rings` is clamped to at least 2 and `segments` to at least 3.
pub fn generate_skysphere(rings: u32, segments: u32) -> SkyMesh {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let stride = segments + 1;

    let mut vertices = Vec::with_capacity(((rings + 1) * stride) as usize);
    for ring in 0..=rings {
        let v = ring as f32 / rings as f32;
        let phi = v * std::f32::consts::PI;
        for segment in 0..=segments {
            let u = segment as f32 / segments as f32;
            let theta = u * std::f32::consts::TAU;
            vertices.push(SkyVertex {
                position: [phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()],
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    SkyMesh { vertices, indices }
}

impl SkyMesh {
    /// Triangle centroid and counter-clockwise face normal.
    pub fn face(&self, triangle: usize) -> (Vec3, Vec3) {
        let corner = |i: usize| Vec3::from(self.vertices[self.indices[triangle * 3 + i] as usize].position);
        let (a, b, c) = (corner(0), corner(1), corner(2));
        ((a + b + c) / 3.0, (b - a).cross(c - a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skysphere_counts() {
        let sky = generate_skysphere(8, 16);
        assert_eq!(sky.vertices.len(), 9 * 17);
        assert_eq!(sky.indices.len(), 8 * 16 * 6);
    }

    #[test]
    fn test_skysphere_is_unit() {
        let sky = generate_skysphere(6, 12);
        for vertex in &sky.vertices {
            assert!((Vec3::from(vertex.position).length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_skysphere_faces_inward() {
        let sky = generate_skysphere(8, 16);
        for triangle in 0..sky.indices.len() / 3 {
            let (centroid, normal) = sky.face(triangle);
            // Pole triangles are degenerate
            if normal.length_squared() > 1e-8 {
                assert!(normal.dot(centroid) < 0.0, "triangle {} faces outward", triangle);
            }
        }
    }

    #[test]
    fn test_minimum_tessellation() {
        let sky = generate_skysphere(0, 0);
        assert_eq!(sky.vertices.len(), 3 * 4);
    }

    #[test]
    fn test_default_horizon_matches_clear_color() {
        assert_eq!(SkySettings::default().horizon, DEFAULT_HORIZON);
    }
}
