//! Configuration Module
//!
//! Editor settings loaded from JSON at startup.

pub mod editor_config;

pub use editor_config::{
    CameraConfig, DEFAULT_CONFIG_PATH, EditorConfig, TerrainConfig, WindowConfig,
};
