//! Editor Configuration
//!
//! JSON-backed settings for the window, camera, terrain and sky.
//! Every section is `#[serde(default)]`, so a config file only needs the
//! keys it wants to change.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, DEFAULT_POSITION, DEFAULT_ROTATION};
use crate::error::Result;
use crate::terrain::{Heightmap, TerrainMeshConfig};
use crate::world::SkySettings;
use crate::world::sky::DEFAULT_HORIZON;

/// Config file read when no path is given on the command line
pub const DEFAULT_CONFIG_PATH: &str = "terrain_editor.json";

/// Window and swapchain settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub msaa: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Terrain Editor".to_string(),
            width: 1280,
            height: 800,
            vsync: true,
            msaa: true,
        }
    }
}

/// Initial camera placement and control tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Degrees: x = yaw, y = pitch, z = roll
    pub rotation: Vec3,
    pub near_plane: f32,
    pub far_plane: f32,
    /// Vertical field of view in degrees
    pub field_of_view: f32,
    /// Units per second for held movement keys
    pub movement_speed: f32,
    pub rotation_speed: f32,
    /// Pixels of drag per degree of rotation
    pub mouse_divisor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            rotation: DEFAULT_ROTATION,
            near_plane: 0.1,
            far_plane: 1024.0,
            field_of_view: 60.0,
            movement_speed: 7.5,
            rotation_speed: 1.0,
            mouse_divisor: 10.0,
        }
    }
}

impl CameraConfig {
    /// Build a camera for a viewport with the given aspect ratio.
    pub fn build_camera(&self, aspect_ratio: f32) -> Camera {
        let mut camera = Camera::with_transform(self.position, self.rotation);
        camera.set_perspective_projection(
            self.field_of_view,
            aspect_ratio,
            self.near_plane,
            self.far_plane,
        );
        camera.set_movement_speed(self.movement_speed);
        camera.set_rotation_speed(self.rotation_speed);
        camera.set_mouse_divisor(self.mouse_divisor);
        camera
    }
}

/// Heightmap source and mesh generation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grayscale heightmap image; procedural terrain is generated when unset
    pub heightmap: Option<PathBuf>,
    /// Samples per side of the procedural heightmap
    pub procedural_dim: u32,
    /// Noise step per sample for the procedural heightmap
    pub procedural_frequency: f32,
    pub mesh: TerrainMeshConfig,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            heightmap: None,
            procedural_dim: 256,
            procedural_frequency: 0.02,
            mesh: TerrainMeshConfig::default().with_subdivisions(2),
        }
    }
}

impl TerrainConfig {
    /// Load the configured heightmap, or generate one.
    pub fn load_heightmap(&self) -> Result<Heightmap> {
        match &self.heightmap {
            Some(path) => Heightmap::load(path, self.mesh.patch_size),
            None => {
                log::info!(
                    "No heightmap configured, generating {}x{} procedural terrain",
                    self.procedural_dim,
                    self.procedural_dim
                );
                Heightmap::procedural(
                    self.procedural_dim,
                    self.mesh.patch_size,
                    self.procedural_frequency,
                )
            }
        }
    }
}

/// Top-level editor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub terrain: TerrainConfig,
    pub sky: SkySettings,
    pub clear_color: [f32; 3],
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            terrain: TerrainConfig::default(),
            sky: SkySettings::default(),
            clear_color: DEFAULT_HORIZON,
        }
    }
}

impl EditorConfig {
    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config named by the first command-line argument, or
    /// `terrain_editor.json`.
    pub fn from_args() -> Result<Self> {
        let path = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        Self::load(path)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.camera.movement_speed, 7.5);
        assert_eq!(config.terrain.mesh.subdivisions, 2);
        assert_eq!(config.clear_color, [0.67, 0.84, 0.9]);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "window": { "vsync": false }, "camera": { "position": [1.0, 2.0, 3.0] } }"#)
                .unwrap();
        assert!(!config.window.vsync);
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.camera.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.camera.far_plane, 1024.0);
    }

    #[test]
    fn test_build_camera() {
        let camera = CameraConfig::default().build_camera(1.6);
        assert_eq!(camera.position(), DEFAULT_POSITION);
        assert_eq!(camera.movement_speed(), 7.5);
        assert_eq!(camera.aspect_ratio(), 1.6);
    }
}
