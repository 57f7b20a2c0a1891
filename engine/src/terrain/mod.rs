//! Terrain Module
//!
//! Heightmap storage and the CPU-side mesh generation that turns it into
//! renderable, chunked geometry.

pub mod heightmap;
pub mod mesh;
pub mod noise;

pub use heightmap::Heightmap;
pub use mesh::{
    TerrainChunk, TerrainMesh, TerrainMeshConfig, TerrainVertex, generate_terrain_mesh,
};
pub use noise::{fbm, noise2d};
