//! Map Tile
//!
//! One heightmap plus the mesh generated from it, placed in the world by a
//! model transform.

use glam::{Mat4, Vec3};

use crate::error::Result;
use crate::render::culling::Frustum;
use crate::terrain::{Heightmap, TerrainChunk, TerrainMesh, TerrainMeshConfig, generate_terrain_mesh};

/// A terrain tile
#[derive(Debug, Clone)]
pub struct MapTile {
    heightmap: Heightmap,
    config: TerrainMeshConfig,
    mesh: TerrainMesh,
    model: Mat4,
}

impl MapTile {
    /// Generate the tile mesh. The model transform starts as identity.
    pub fn new(heightmap: Heightmap, config: TerrainMeshConfig) -> Result<Self> {
        let mesh = generate_terrain_mesh(&heightmap, &config)?;
        log::info!(
            "Generated terrain tile: {} vertices, {} triangles, {} chunks",
            mesh.vertices.len(),
            mesh.triangle_count(),
            mesh.chunks.len()
        );
        Ok(Self {
            heightmap,
            config,
            mesh,
            model: Mat4::IDENTITY,
        })
    }

    pub fn heightmap(&self) -> &Heightmap {
        &self.heightmap
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn config(&self) -> &TerrainMeshConfig {
        &self.config
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }

    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
    }

    /// Side length of the tile in world units.
    pub fn extent(&self) -> f32 {
        self.mesh.resolution as f32 * self.config.cell_size / self.config.subdivisions as f32
    }

    /// Regenerate the mesh at a new tessellation level.
    ///
    /// Returns `false` if the level is unchanged and nothing was rebuilt.
    pub fn set_subdivisions(&mut self, subdivisions: u32) -> Result<bool> {
        if subdivisions == self.config.subdivisions {
            return Ok(false);
        }
        let config = self.config.with_subdivisions(subdivisions);
        self.mesh = generate_terrain_mesh(&self.heightmap, &config)?;
        self.config = config;
        log::info!(
            "Rebuilt terrain tile at subdivision level {} ({} triangles)",
            subdivisions,
            self.mesh.triangle_count()
        );
        Ok(true)
    }

    /// World-space bounds of a chunk under the tile's model transform.
    pub fn chunk_bounds(&self, chunk: &TerrainChunk) -> (Vec3, Vec3) {
        transform_aabb(self.model, chunk.min, chunk.max)
    }

    /// Chunks whose bounds intersect the frustum.
    pub fn visible_chunks<'a>(&'a self, frustum: &'a Frustum) -> impl Iterator<Item = &'a TerrainChunk> + 'a {
        self.mesh.chunks.iter().filter(move |chunk| {
            let (min, max) = self.chunk_bounds(chunk);
            frustum.check_aabb(min, max)
        })
    }
}

/// Axis-aligned bounds of a transformed box.
fn transform_aabb(model: Mat4, min: Vec3, max: Vec3) -> (Vec3, Vec3) {
    if model == Mat4::IDENTITY {
        return (min, max);
    }
    let mut out_min = Vec3::splat(f32::INFINITY);
    let mut out_max = Vec3::splat(f32::NEG_INFINITY);
    for i in 0..8 {
        let corner = Vec3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 4 == 0 { min.z } else { max.z },
        );
        let p = model.transform_point3(corner);
        out_min = out_min.min(p);
        out_max = out_max.max(p);
    }
    (out_min, out_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> MapTile {
        let map = Heightmap::from_samples(16, vec![20_000; 256], 8).unwrap();
        let config = TerrainMeshConfig {
            patch_size: 8,
            chunks: 2,
            ..Default::default()
        };
        MapTile::new(map, config).unwrap()
    }

    #[test]
    fn test_set_subdivisions_rebuilds() {
        let mut tile = tile();
        assert_eq!(tile.mesh().resolution, 8);
        assert!(!tile.set_subdivisions(1).unwrap());
        assert!(tile.set_subdivisions(3).unwrap());
        assert_eq!(tile.mesh().resolution, 22);
    }

    #[test]
    fn test_translated_bounds() {
        let mut tile = tile();
        tile.set_model(Mat4::from_translation(Vec3::new(100.0, 0.0, 0.0)));
        let chunk = tile.mesh().chunks[0];
        let (min, _) = tile.chunk_bounds(&chunk);
        assert!((min.x - (chunk.min.x + 100.0)).abs() < 1e-4);
    }

    #[test]
    fn test_identity_frustum_culls_far_chunks() {
        let mut tile = tile();
        // Move the tile entirely outside the unit clip cube
        tile.set_model(Mat4::from_translation(Vec3::new(500.0, 0.0, 0.0)));
        let frustum = Frustum::default();
        assert_eq!(tile.visible_chunks(&frustum).count(), 0);
    }
}
