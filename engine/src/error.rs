//! Error types for the terrain editor.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for editor operations.
#[derive(Error, Debug)]
pub enum EditorError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Heightmap image could not be decoded
    #[error("Failed to decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Heightmap data is malformed (wrong size, not square, zero patch size)
    #[error("Invalid heightmap: {0}")]
    InvalidHeightmap(String),

    /// Terrain mesh parameters are out of range
    #[error("Invalid terrain mesh configuration: {0}")]
    InvalidMeshConfig(String),

    /// Configuration file is not valid JSON for `EditorConfig`
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Window surface could not be created
    #[error("Failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// No adapter compatible with the surface
    #[error("Failed to find GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    /// Device creation failed
    #[error("Failed to create GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    /// Surface reports no usable texture format
    #[error("Surface is not supported by the adapter")]
    UnsupportedSurface,

    /// Unrecoverable surface error while acquiring a frame
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    /// Windowing event loop failure
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Window creation failure
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

/// Result type alias for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
