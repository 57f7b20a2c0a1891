//! Render Module
//!
//! wgpu-based rendering for the terrain editor: device and swapchain
//! lifecycle, the pass abstraction, the sky and terrain passes, and the
//! per-frame submit/present cycle.

pub mod culling;
pub mod gpu_context;
pub mod pipeline;
pub mod render_pass;
pub mod renderer;
pub mod shader_loader;
pub mod sky_pass;
pub mod terrain_pass;
pub mod uniforms;

// Re-export commonly used types for convenience
pub use culling::{FRUSTUM_PLANE_COUNT, Frustum, FrustumSide};
pub use gpu_context::{DEPTH_FORMAT, GpuContext, GpuContextConfig, select_sample_count};
pub use render_pass::{FrameContext, RenderContext, RenderPass, RenderPassManager, RenderPassPriority};
pub use renderer::{FrameOutcome, FrameStats, Renderer};
pub use shader_loader::{SKY_SHADER, TERRAIN_SHADER};
pub use sky_pass::SkyPass;
pub use terrain_pass::TerrainPass;
pub use uniforms::{LIGHT_POSITION, SkyUniforms, TerrainUniforms};
