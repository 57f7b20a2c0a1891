//! Terrain Editor Engine Library
//!
//! Heightmap terrain rendering with wgpu: a free-flying camera, chunked
//! and frustum-culled terrain meshes, a skysphere, and the GPU resource
//! lifecycle that draws them.
//!
//! # Modules
//!
//! - [`camera`] - Free-flying yaw/pitch/roll camera
//! - [`config`] - JSON editor configuration
//! - [`error`] - Error type shared by all fallible operations
//! - [`input`] - Platform-agnostic keyboard/mouse state and editor controls
//! - [`render`] - GPU context, render passes, frustum culling and frame loop
//! - [`terrain`] - Heightmaps and terrain mesh generation
//! - [`world`] - Map tiles, sky, and display state
//!
//! # Example
//!
//! ```ignore
//! use terrain_editor_engine::config::EditorConfig;
//! use terrain_editor_engine::render::{Renderer, SkyPass, TerrainPass};
//! use terrain_editor_engine::world::World;
//!
//! let config = EditorConfig::from_args()?;
//! let heightmap = config.terrain.load_heightmap()?;
//! let mut world = World::new(heightmap, config.terrain.mesh)?;
//! let mut camera = config.camera.build_camera(width as f32 / height as f32);
//!
//! let mut renderer = Renderer::new(window, gpu_config, config.clear_color)?;
//! renderer.add_pass(Box::new(SkyPass::new(config.sky)))?;
//! renderer.add_pass(Box::new(TerrainPass::new()))?;
//!
//! // Each frame
//! world.update(&camera);
//! renderer.render_frame(&camera, &world)?;
//! ```

pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod render;
pub mod terrain;
pub mod world;

// Re-export commonly used types for convenience
pub use camera::Camera;
pub use config::EditorConfig;
pub use error::{EditorError, Result};
pub use input::{InputState, KeyCode, KeyboardState, MouseButton, MouseState};
pub use render::{Frustum, Renderer};
pub use terrain::{Heightmap, TerrainMesh, TerrainMeshConfig};
pub use world::World;
