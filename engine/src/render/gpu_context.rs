//! GPU Context
//!
//! Unified GPU resource management for the editor.
//! Owns device, queue, swapchain (surface) and the size-dependent render
//! targets: depth buffer and the optional multisampled colour target.

use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::error::{EditorError, Result};

/// Depth buffer format shared by all pipelines
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// MSAA sample counts, most preferred first
const SAMPLE_COUNT_CANDIDATES: [u32; 3] = [16, 8, 4];

/// Shared GPU resources
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub sample_count: u32,
    pub depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    /// Multisampled colour target, resolved into the swapchain image
    pub msaa_view: Option<wgpu::TextureView>,
}

/// Configuration for GPU context creation
#[derive(Clone)]
pub struct GpuContextConfig {
    /// Use VSync (true = capped to monitor refresh, false = uncapped FPS)
    pub vsync: bool,
    /// Enable multisampling at the highest supported sample count
    pub msaa: bool,
    /// Prefer high-performance GPU
    pub high_performance: bool,
}

impl Default for GpuContextConfig {
    fn default() -> Self {
        Self {
            vsync: true,
            msaa: true,
            high_performance: true,
        }
    }
}

/// Pick the highest of 16, 8 or 4 samples that `flags` supports, or 1.
pub fn select_sample_count(requested: bool, flags: wgpu::TextureFormatFeatureFlags) -> u32 {
    if !requested {
        return 1;
    }
    SAMPLE_COUNT_CANDIDATES
        .into_iter()
        .find(|&count| flags.sample_count_supported(count))
        .unwrap_or(1)
}

impl GpuContext {
    /// Create a new GPU context for a window
    pub fn new(window: Arc<Window>, config: GpuContextConfig) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: if config.high_performance {
                wgpu::PowerPreference::HighPerformance
            } else {
                wgpu::PowerPreference::LowPower
            },
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;
        log::info!("Using GPU adapter: {}", adapter.get_info().name);

        // Sample counts above 4 are adapter-specific and need this feature
        let adapter_specific = adapter
            .features()
            .contains(wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES);
        let required_features = if adapter_specific {
            wgpu::Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Terrain Editor Device"),
            required_features,
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            ..Default::default()
        }))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(EditorError::UnsupportedSurface)?;
        log::info!("Surface format: {:?}", surface_format);

        let present_mode = if config.vsync {
            wgpu::PresentMode::AutoVsync
        } else if surface_caps
            .present_modes
            .contains(&wgpu::PresentMode::Immediate)
        {
            wgpu::PresentMode::Immediate
        } else if surface_caps
            .present_modes
            .contains(&wgpu::PresentMode::Mailbox)
        {
            wgpu::PresentMode::Mailbox
        } else {
            wgpu::PresentMode::AutoVsync
        };

        let sample_flags = if adapter_specific {
            adapter.get_texture_format_features(surface_format).flags
                & adapter.get_texture_format_features(DEPTH_FORMAT).flags
        } else {
            wgpu::TextureFormatFeatureFlags::MULTISAMPLE_X4
        };
        let sample_count = select_sample_count(config.msaa, sample_flags);
        log::info!("MSAA sample count: {}", sample_count);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let (depth_texture, depth_view) =
            Self::create_depth_texture(&device, size.width, size.height, sample_count);
        let msaa_view = Self::create_msaa_view(
            &device,
            surface_format,
            size.width,
            size.height,
            sample_count,
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            sample_count,
            depth_texture,
            depth_view,
            msaa_view,
        })
    }

    /// Create depth texture with given dimensions
    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    /// Create the multisampled colour target, if multisampling is on
    fn create_msaa_view(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Colour Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.surface_config.width = width;
            self.surface_config.height = height;
            self.surface.configure(&self.device, &self.surface_config);

            let (depth_texture, depth_view) =
                Self::create_depth_texture(&self.device, width, height, self.sample_count);
            self.depth_texture = depth_texture;
            self.depth_view = depth_view;
            self.msaa_view = Self::create_msaa_view(
                &self.device,
                self.surface_config.format,
                width,
                height,
                self.sample_count,
            );
            log::info!("Resized surface to {}x{}", width, height);
        }
    }

    /// Reconfigure the surface at its current size (after Lost/Outdated)
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Get current surface dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }

    /// Get surface format
    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Get current surface texture for rendering
    pub fn get_current_texture(&self) -> std::result::Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }
}

/// Create a uniform buffer with initial data
pub fn create_uniform_buffer<T: bytemuck::Pod>(device: &wgpu::Device, label: &str, data: &T) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::bytes_of(data),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Create a vertex buffer with initial data
pub fn create_vertex_buffer<T: bytemuck::Pod>(device: &wgpu::Device, label: &str, data: &[T]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// Create an index buffer with initial data
pub fn create_index_buffer(device: &wgpu::Device, label: &str, data: &[u32]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::INDEX,
    })
}

/// Write a uniform struct to the start of a buffer
pub fn write_buffer<T: bytemuck::Pod>(queue: &wgpu::Queue, buffer: &wgpu::Buffer, data: &T) {
    queue.write_buffer(buffer, 0, bytemuck::bytes_of(data));
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormatFeatureFlags as Flags;

    #[test]
    fn test_sample_count_prefers_highest() {
        let flags = Flags::MULTISAMPLE_X4 | Flags::MULTISAMPLE_X8 | Flags::MULTISAMPLE_X16;
        assert_eq!(select_sample_count(true, flags), 16);
        assert_eq!(select_sample_count(true, Flags::MULTISAMPLE_X4 | Flags::MULTISAMPLE_X8), 8);
        assert_eq!(select_sample_count(true, Flags::MULTISAMPLE_X4), 4);
    }

    #[test]
    fn test_sample_count_fallback() {
        assert_eq!(select_sample_count(true, Flags::empty()), 1);
        assert_eq!(select_sample_count(true, Flags::MULTISAMPLE_X2), 1);
        assert_eq!(select_sample_count(false, Flags::all()), 1);
    }
}
