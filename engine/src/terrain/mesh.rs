//! Terrain Mesh Generator
//!
//! Turns a heightmap into an indexed triangle grid:
//! - Grid tessellation with optional CPU subdivision (bilinear displacement)
//! - Vertex normals reconstructed with a 3x3 Sobel filter over sampled heights
//! - Index buffer laid out chunk by chunk so each chunk can be culled and
//!   drawn as one contiguous `draw_indexed` range
//! - Line-list edge indices for wireframe display

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::heightmap::Heightmap;
use crate::error::{EditorError, Result};

/// Vertex data for the terrain mesh (32 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(TerrainVertex, [u8; 32]);

impl TerrainVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    /// Vertex buffer layout matching `terrain.wgsl`
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TerrainVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Terrain mesh configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainMeshConfig {
    /// Patch-grid vertices per side
    pub patch_size: u32,
    /// World units between patch-grid vertices
    pub cell_size: f32,
    /// World height of a full-scale (1.0) sample
    pub displacement_factor: f32,
    pub uv_scale: f32,
    /// Culling chunks per side
    pub chunks: u32,
    /// Tessellation level: vertices inserted per patch cell edge, 1 = none
    pub subdivisions: u32,
}

impl Default for TerrainMeshConfig {
    fn default() -> Self {
        Self {
            patch_size: 64,
            cell_size: 2.0,
            displacement_factor: 32.0,
            uv_scale: 1.0,
            chunks: 4,
            subdivisions: 1,
        }
    }
}

impl TerrainMeshConfig {
    /// Same configuration at a different tessellation level.
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    /// Vertices per side of the generated grid, `None` if it overflows `u32`.
    pub fn grid_resolution(&self) -> Option<u32> {
        self.patch_size
            .checked_sub(1)?
            .checked_mul(self.subdivisions)?
            .checked_add(1)
    }

    /// Check the config and return the grid resolution.
    ///
    /// Vertex and index counts must be addressable by `u32` indices.
    fn validate(&self) -> Result<u32> {
        if self.patch_size < 2 {
            return Err(EditorError::InvalidMeshConfig(format!(
                "patch size must be at least 2, got {}",
                self.patch_size
            )));
        }
        if self.subdivisions == 0 {
            return Err(EditorError::InvalidMeshConfig("subdivisions must be at least 1".into()));
        }
        if self.chunks == 0 {
            return Err(EditorError::InvalidMeshConfig("chunk count must be at least 1".into()));
        }
        if self.cell_size <= 0.0 {
            return Err(EditorError::InvalidMeshConfig(format!(
                "cell size must be positive, got {}",
                self.cell_size
            )));
        }

        let fits = |n: u32| {
            let cells = n - 1;
            n.checked_mul(n).is_some()
                && cells.checked_mul(cells).and_then(|c| c.checked_mul(6)).is_some()
                && n.checked_mul(cells).and_then(|c| c.checked_mul(4)).is_some()
        };
        self.grid_resolution().filter(|&n| fits(n)).ok_or_else(|| {
            EditorError::InvalidMeshConfig(format!(
                "patch size {} with {} subdivisions exceeds the 32-bit index range",
                self.patch_size, self.subdivisions
            ))
        })
    }
}

/// A contiguous, cullable slice of the terrain index buffers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainChunk {
    pub index_offset: u32,
    pub index_count: u32,
    pub wireframe_offset: u32,
    pub wireframe_count: u32,
    pub min: Vec3,
    pub max: Vec3,
}

/// Generated terrain mesh data
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    pub vertices: Vec<TerrainVertex>,
    /// Triangle list, chunk by chunk
    pub indices: Vec<u32>,
    /// Line list, chunk by chunk
    pub wireframe_indices: Vec<u32>,
    pub chunks: Vec<TerrainChunk>,
    /// Vertices per side
    pub resolution: u32,
}

impl TerrainMesh {
    /// Bounding box of the whole mesh.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.chunks.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), chunk| (min.min(chunk.min), max.max(chunk.max)),
        )
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Bilinear height in [0, 1] at fractional patch-grid coordinates.
fn sample_height(heightmap: &Heightmap, patch_size: u32, fx: f32, fz: f32) -> f32 {
    let last = (patch_size - 1) as f32;
    let fx = fx.clamp(0.0, last);
    let fz = fz.clamp(0.0, last);

    let x0 = fx.floor() as u32;
    let z0 = fz.floor() as u32;
    let x1 = (x0 + 1).min(patch_size - 1);
    let z1 = (z0 + 1).min(patch_size - 1);
    let tx = fx - x0 as f32;
    let tz = fz - z0 as f32;

    let h00 = heightmap.height(x0, z0);
    let h10 = heightmap.height(x1, z0);
    let h01 = heightmap.height(x0, z1);
    let h11 = heightmap.height(x1, z1);

    let top = h00 + (h10 - h00) * tx;
    let bottom = h01 + (h11 - h01) * tx;
    top + (bottom - top) * tz
}

/// Sobel-filtered normal at fractional patch-grid coordinates.
///
/// Neighbours are one patch step apart regardless of subdivision, so the
/// shading does not change with the tessellation level.
fn sample_normal(heightmap: &Heightmap, patch_size: u32, fx: f32, fz: f32) -> Vec3 {
    let mut h = [[0.0f32; 3]; 3];
    for (i, column) in h.iter_mut().enumerate() {
        for (j, value) in column.iter_mut().enumerate() {
            *value = sample_height(
                heightmap,
                patch_size,
                fx + i as f32 - 1.0,
                fz + j as f32 - 1.0,
            );
        }
    }

    let nx = h[0][0] - h[2][0] + 2.0 * h[0][1] - 2.0 * h[2][1] + h[0][2] - h[2][2];
    let nz = h[0][0] + 2.0 * h[1][0] + h[2][0] - h[0][2] - 2.0 * h[1][2] - h[2][2];
    let ny = 0.25 * (1.0 - nx * nx - nz * nz).max(0.0).sqrt();

    let normal = Vec3::new(nx * 2.0, ny, nz * 2.0);
    if normal.length_squared() > f32::EPSILON {
        normal.normalize()
    } else {
        Vec3::Y
    }
}

/// Split `cells` into `parts` ranges as evenly as integer division allows.
fn split_range(cells: u32, parts: u32, index: u32) -> (u32, u32) {
    (index * cells / parts, (index + 1) * cells / parts)
}

/// Generate the terrain mesh for one heightmap tile.
pub fn generate_terrain_mesh(heightmap: &Heightmap, config: &TerrainMeshConfig) -> Result<TerrainMesh> {
    let n = config.validate()?;

    let patch_size = config.patch_size;
    let subdivisions = config.subdivisions;
    let cells = n - 1;
    let step = config.cell_size / subdivisions as f32;
    let half_extent = n as f32 * step / 2.0;

    let mut vertices = Vec::with_capacity((n * n) as usize);
    for z in 0..n {
        for x in 0..n {
            let fx = x as f32 / subdivisions as f32;
            let fz = z as f32 / subdivisions as f32;
            let height = sample_height(heightmap, patch_size, fx, fz) * config.displacement_factor;
            let normal = sample_normal(heightmap, patch_size, fx, fz);

            vertices.push(TerrainVertex {
                position: [
                    x as f32 * step + step / 2.0 - half_extent,
                    height,
                    z as f32 * step + step / 2.0 - half_extent,
                ],
                normal: normal.into(),
                uv: [
                    x as f32 / cells as f32 * config.uv_scale,
                    z as f32 / cells as f32 * config.uv_scale,
                ],
            });
        }
    }

    let chunk_count = config.chunks.min(cells);
    let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
    let mut wireframe_indices = Vec::with_capacity((n * cells * 4) as usize);
    let mut chunks = Vec::with_capacity((chunk_count * chunk_count) as usize);

    for cz in 0..chunk_count {
        let (z0, z1) = split_range(cells, chunk_count, cz);
        for cx in 0..chunk_count {
            let (x0, x1) = split_range(cells, chunk_count, cx);

            let index_offset = indices.len() as u32;
            for z in z0..z1 {
                for x in x0..x1 {
                    let top_left = x + z * n;
                    let bottom_left = x + (z + 1) * n;
                    let bottom_right = (x + 1) + (z + 1) * n;
                    let top_right = (x + 1) + z * n;
                    indices.extend_from_slice(&[
                        top_left,
                        bottom_left,
                        bottom_right,
                        top_left,
                        bottom_right,
                        top_right,
                    ]);
                }
            }

            // Each edge belongs to exactly one chunk: a chunk owns the top and
            // left edges of its cells, plus the closing border edges.
            let wireframe_offset = wireframe_indices.len() as u32;
            let z_rows = if z1 == cells { z1 + 1 } else { z1 };
            for z in z0..z_rows {
                for x in x0..x1 {
                    wireframe_indices.extend_from_slice(&[x + z * n, x + 1 + z * n]);
                }
            }
            let x_columns = if x1 == cells { x1 + 1 } else { x1 };
            for x in x0..x_columns {
                for z in z0..z1 {
                    wireframe_indices.extend_from_slice(&[x + z * n, x + (z + 1) * n]);
                }
            }

            let mut min = Vec3::splat(f32::INFINITY);
            let mut max = Vec3::splat(f32::NEG_INFINITY);
            for z in z0..=z1 {
                for x in x0..=x1 {
                    let p = Vec3::from(vertices[(x + z * n) as usize].position);
                    min = min.min(p);
                    max = max.max(p);
                }
            }

            chunks.push(TerrainChunk {
                index_offset,
                index_count: indices.len() as u32 - index_offset,
                wireframe_offset,
                wireframe_count: wireframe_indices.len() as u32 - wireframe_offset,
                min,
                max,
            });
        }
    }

    Ok(TerrainMesh {
        vertices,
        indices,
        wireframe_indices,
        chunks,
        resolution: n,
    })
}
