//! Shader Loading Utilities
//!
//! The editor's WGSL shaders are embedded at compile time; there is no
//! runtime shader discovery.

/// Terrain shader (lit, height-tinted; also draws the wireframe)
pub const TERRAIN_SHADER: &str = include_str!("../../../shaders/terrain.wgsl");

/// Skysphere gradient shader
pub const SKY_SHADER: &str = include_str!("../../../shaders/sky.wgsl");

/// Create a wgpu shader module from embedded WGSL source.
pub fn create_shader_module(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    })
}
