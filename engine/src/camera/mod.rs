//! Camera Module
//!
//! Provides the editor's free-flying camera.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod fly_camera;

pub use fly_camera::{Camera, DEFAULT_POSITION, DEFAULT_ROTATION, wrap_degrees};
