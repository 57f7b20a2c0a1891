//! World Module
//!
//! Contains the terrain tiles, the sky, and the display state the renderer
//! draws from.
//!
//! ## Default World
//! A single heightmap tile centred on the origin under a skysphere.

pub mod map_tile;
pub mod scene;
pub mod sky;

pub use map_tile::MapTile;
pub use scene::{DrawRange, TILES, TileDraw, World};
pub use sky::{SkyMesh, SkySettings, SkyVertex, generate_skysphere};
