//! Renderer
//!
//! Runs the per-frame acquire/record/submit/present cycle over the
//! registered render passes and keeps frame statistics.

use std::sync::Arc;
use std::time::Instant;
use winit::window::Window;

use super::gpu_context::{GpuContext, GpuContextConfig};
use super::render_pass::{FrameContext, RenderContext, RenderPass, RenderPassManager};
use crate::camera::Camera;
use crate::error::Result;
use crate::world::World;

/// What happened to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented,
    /// Surface was lost/outdated/busy; nothing was drawn
    Skipped,
}

/// Frame counter with an FPS value refreshed once per second
#[derive(Debug, Clone)]
pub struct FrameStats {
    total_frames: u64,
    frames_since_update: u32,
    fps: f32,
    last_frame: Instant,
    last_fps_update: Instant,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self {
            total_frames: 0,
            frames_since_update: 0,
            fps: 0.0,
            last_frame: now,
            last_fps_update: now,
        }
    }

    /// Count a frame at `now`; returns the delta time in seconds.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta_time = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.total_frames += 1;
        self.frames_since_update += 1;

        let fps_elapsed = now.saturating_duration_since(self.last_fps_update).as_secs_f32();
        if fps_elapsed >= 1.0 {
            self.fps = self.frames_since_update as f32 / fps_elapsed;
            self.frames_since_update = 0;
            self.last_fps_update = now;
        }
        delta_time
    }

    /// Frames per second over the last full second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn frame_count(&self) -> u64 {
        self.total_frames
    }
}

/// Owns the GPU context and render passes
pub struct Renderer {
    gpu: GpuContext,
    passes: RenderPassManager,
    clear_color: wgpu::Color,
    stats: FrameStats,
}

impl Renderer {
    /// Create a renderer for a window
    pub fn new(window: Arc<Window>, config: GpuContextConfig, clear_color: [f32; 3]) -> Result<Self> {
        let gpu = GpuContext::new(window, config)?;
        Ok(Self {
            gpu,
            passes: RenderPassManager::new(),
            clear_color: wgpu::Color {
                r: clear_color[0] as f64,
                g: clear_color[1] as f64,
                b: clear_color[2] as f64,
                a: 1.0,
            },
            stats: FrameStats::new(Instant::now()),
        })
    }

    fn render_context(gpu: &GpuContext) -> RenderContext<'_> {
        let (width, height) = gpu.dimensions();
        RenderContext {
            device: &gpu.device,
            queue: &gpu.queue,
            surface_format: gpu.format(),
            sample_count: gpu.sample_count,
            width,
            height,
        }
    }

    /// Register and initialize a pass
    pub fn add_pass(&mut self, mut pass: Box<dyn RenderPass>) -> Result<()> {
        pass.initialize(&Self::render_context(&self.gpu))?;
        log::info!("Added render pass '{}'", pass.name());
        self.passes.add_pass(pass);
        log::debug!("Render order: {:?}", self.passes.pass_names());
        Ok(())
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Get current surface dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        self.gpu.dimensions()
    }

    /// Handle window resize. Zero sizes (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.gpu.resize(width, height);
        let ctx = Self::render_context(&self.gpu);
        self.passes.resize(&ctx, width, height);
    }

    /// Render one frame of the world as seen by `camera`.
    pub fn render_frame(&mut self, camera: &Camera, world: &World) -> Result<FrameOutcome> {
        let output = match self.gpu.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return Ok(FrameOutcome::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                return Ok(FrameOutcome::Skipped);
            }
            Err(e @ wgpu::SurfaceError::OutOfMemory) => return Err(e.into()),
            Err(e) => {
                log::warn!("Surface error: {}, skipping frame", e);
                return Ok(FrameOutcome::Skipped);
            }
        };

        let delta_time = self.stats.tick(Instant::now());
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let ctx = Self::render_context(&self.gpu);
        let frame = FrameContext {
            camera,
            world,
            delta_time,
        };
        self.passes.update(&ctx, &frame);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        // Render into the MSAA target when present and resolve to the swapchain image
        let (color_view, resolve_target) = match &self.gpu.msaa_view {
            Some(msaa_view) => (msaa_view, Some(&view)),
            None => (&view, None),
        };

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_viewport(0.0, 0.0, ctx.width as f32, ctx.height as f32, 0.0, 1.0);
            self.passes.render(&mut pass);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(FrameOutcome::Presented)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fps_updates_once_per_second() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);

        for i in 1..=30 {
            stats.tick(start + Duration::from_millis(i * 20));
        }
        // 600ms elapsed, no FPS sample yet
        assert_eq!(stats.fps(), 0.0);

        for i in 31..=50 {
            stats.tick(start + Duration::from_millis(i * 20));
        }
        // 50 frames over exactly one second
        assert!((stats.fps() - 50.0).abs() < 1e-3);
        assert_eq!(stats.frame_count(), 50);
    }

    #[test]
    fn test_tick_returns_delta() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);
        let dt = stats.tick(start + Duration::from_millis(16));
        assert!((dt - 0.016).abs() < 1e-6);
    }
}
