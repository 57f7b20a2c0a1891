//! Editor World
//!
//! Owns the terrain tiles plus the per-frame view state the renderer reads:
//! the culling frustum and the wireframe/tessellation display toggles.

use glam::{Mat4, Vec3};

use super::map_tile::MapTile;
use crate::camera::Camera;
use crate::error::Result;
use crate::render::culling::Frustum;
use crate::terrain::{Heightmap, TerrainMeshConfig};

/// Tiles per side
pub const TILES: usize = 1;

/// A contiguous index range to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRange {
    pub first_index: u32,
    pub index_count: u32,
}

/// Visible index ranges for one tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileDraw {
    pub tile: usize,
    pub ranges: Vec<DrawRange>,
}

/// Terrain scene state
#[derive(Debug)]
pub struct World {
    tiles: Vec<MapTile>,
    frustum: Frustum,
    wireframe: bool,
    tessellation: bool,
    subdivisions: u32,
    revision: u64,
}

impl World {
    /// Build a `TILES x TILES` grid from one heightmap, starting tessellated.
    pub fn new(heightmap: Heightmap, mesh_config: TerrainMeshConfig) -> Result<Self> {
        let mut tiles = Vec::with_capacity(TILES * TILES);
        let center = (TILES as f32 - 1.0) / 2.0;
        for z in 0..TILES {
            for x in 0..TILES {
                let mut tile = MapTile::new(heightmap.clone(), mesh_config)?;
                let offset = Vec3::new(x as f32 - center, 0.0, z as f32 - center) * tile.extent();
                tile.set_model(Mat4::from_translation(offset));
                tiles.push(tile);
            }
        }

        Ok(Self {
            tiles,
            frustum: Frustum::default(),
            wireframe: false,
            tessellation: true,
            subdivisions: mesh_config.subdivisions,
            revision: 0,
        })
    }

    pub fn tiles(&self) -> &[MapTile] {
        &self.tiles
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Refresh the culling frustum from the camera.
    pub fn update(&mut self, camera: &Camera) {
        self.frustum.update(camera.view_projection_matrix());
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    pub fn toggle_wireframe(&mut self) -> bool {
        self.wireframe = !self.wireframe;
        log::info!("Wireframe {}", if self.wireframe { "on" } else { "off" });
        self.wireframe
    }

    pub fn tessellation(&self) -> bool {
        self.tessellation
    }

    /// Switch between the configured tessellation level and the coarse mesh.
    ///
    /// The flag only changes once every tile has been rebuilt.
    pub fn set_tessellation(&mut self, tessellation: bool) -> Result<()> {
        let subdivisions = if tessellation { self.subdivisions } else { 1 };
        let mut rebuilt = false;
        let mut result = Ok(());
        for tile in &mut self.tiles {
            match tile.set_subdivisions(subdivisions) {
                Ok(changed) => rebuilt |= changed,
                Err(e) => {
                    result = Err(e);
                    break;
                }
            }
        }
        // Tiles rebuilt before a failure still need a re-upload
        if rebuilt {
            self.revision += 1;
        }
        result?;
        self.tessellation = tessellation;
        Ok(())
    }

    pub fn toggle_tessellation(&mut self) -> Result<bool> {
        self.set_tessellation(!self.tessellation)?;
        log::info!("Tessellation {}", if self.tessellation { "on" } else { "off" });
        Ok(self.tessellation)
    }

    /// Bumped whenever tile meshes are regenerated.
    pub fn mesh_revision(&self) -> u64 {
        self.revision
    }

    /// Visible chunk ranges per tile, from the triangle or wireframe index
    /// buffer depending on the display mode.
    pub fn draw_list(&self) -> Vec<TileDraw> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(tile_index, tile)| TileDraw {
                tile: tile_index,
                ranges: tile
                    .visible_chunks(&self.frustum)
                    .map(|chunk| {
                        if self.wireframe {
                            DrawRange {
                                first_index: chunk.wireframe_offset,
                                index_count: chunk.wireframe_count,
                            }
                        } else {
                            DrawRange {
                                first_index: chunk.index_offset,
                                index_count: chunk.index_count,
                            }
                        }
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        let map = Heightmap::from_samples(16, vec![0; 256], 8).unwrap();
        let config = TerrainMeshConfig {
            patch_size: 8,
            chunks: 2,
            subdivisions: 2,
            ..Default::default()
        };
        World::new(map, config).unwrap()
    }

    #[test]
    fn test_defaults() {
        let world = world();
        assert_eq!(world.tiles().len(), TILES * TILES);
        assert!(!world.wireframe());
        assert!(world.tessellation());
    }

    #[test]
    fn test_tessellation_toggle_rebuilds() {
        let mut world = world();
        assert_eq!(world.tiles()[0].mesh().resolution, 15);
        assert!(!world.toggle_tessellation().unwrap());
        assert_eq!(world.tiles()[0].mesh().resolution, 8);
        assert_eq!(world.mesh_revision(), 1);
        assert!(world.toggle_tessellation().unwrap());
        assert_eq!(world.tiles()[0].mesh().resolution, 15);
        assert_eq!(world.mesh_revision(), 2);
    }

    #[test]
    fn test_failed_rebuild_keeps_tessellation_state() {
        let mut world = world();
        world.set_tessellation(false).unwrap();
        // A level whose grid overflows the index range
        world.subdivisions = u32::MAX;

        assert!(world.set_tessellation(true).is_err());
        assert!(!world.tessellation());
        assert_eq!(world.tiles()[0].config().subdivisions, 1);
        assert_eq!(world.mesh_revision(), 1);
    }

    #[test]
    fn test_draw_list_switches_buffers() {
        let mut world = world();
        let camera = Camera::new();
        world.update(&camera);

        let filled = world.draw_list();
        world.toggle_wireframe();
        let lines = world.draw_list();
        assert_eq!(filled[0].ranges.len(), lines[0].ranges.len());
        if let (Some(a), Some(b)) = (filled[0].ranges.first(), lines[0].ranges.first()) {
            assert_ne!(a.index_count, b.index_count);
        }
    }
}
