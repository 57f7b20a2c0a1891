//! Sky Pass
//!
//! Draws the skysphere first each frame, centred on the camera, without
//! writing depth.

use super::gpu_context::{create_index_buffer, create_uniform_buffer, create_vertex_buffer, write_buffer};
use super::pipeline::{
    PipelineSettings, create_render_pipeline, create_uniform_bind_group,
    create_uniform_bind_group_layout,
};
use super::render_pass::{FrameContext, RenderContext, RenderPass, RenderPassPriority};
use super::shader_loader::{SKY_SHADER, create_shader_module};
use super::uniforms::SkyUniforms;
use crate::error::Result;
use crate::world::{SkyMesh, SkySettings, SkyVertex, generate_skysphere};

const SKY_RINGS: u32 = 24;
const SKY_SEGMENTS: u32 = 48;

struct SkyGpu {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

/// Skysphere render pass
pub struct SkyPass {
    settings: SkySettings,
    mesh: SkyMesh,
    gpu: Option<SkyGpu>,
}

impl SkyPass {
    pub fn new(settings: SkySettings) -> Self {
        Self {
            settings,
            mesh: generate_skysphere(SKY_RINGS, SKY_SEGMENTS),
            gpu: None,
        }
    }
}

impl RenderPass for SkyPass {
    fn name(&self) -> &'static str {
        "sky"
    }

    fn priority(&self) -> RenderPassPriority {
        RenderPassPriority::Background
    }

    fn initialize(&mut self, ctx: &RenderContext) -> Result<()> {
        let shader = create_shader_module(ctx.device, "Sky Shader", SKY_SHADER);
        let layout = create_uniform_bind_group_layout(ctx.device, "Sky Bind Group Layout");
        let initial: SkyUniforms = bytemuck::Zeroable::zeroed();
        let uniform_buffer = create_uniform_buffer(ctx.device, "Sky Uniforms", &initial);
        let bind_group = create_uniform_bind_group(ctx.device, "Sky Bind Group", &layout, &uniform_buffer);

        let pipeline = create_render_pipeline(
            ctx,
            PipelineSettings {
                label: "Sky",
                shader: &shader,
                bind_group_layout: &layout,
                vertex_layout: SkyVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                depth_write: false,
                depth_compare: wgpu::CompareFunction::LessEqual,
            },
        );

        self.gpu = Some(SkyGpu {
            vertex_buffer: create_vertex_buffer(ctx.device, "Sky Vertices", &self.mesh.vertices),
            index_buffer: create_index_buffer(ctx.device, "Sky Indices", &self.mesh.indices),
            index_count: self.mesh.indices.len() as u32,
            uniform_buffer,
            bind_group,
            pipeline,
        });
        Ok(())
    }

    fn update(&mut self, ctx: &RenderContext, frame: &FrameContext) {
        if let Some(gpu) = &self.gpu {
            let uniforms = SkyUniforms::new(frame.camera, &self.settings);
            write_buffer(ctx.queue, &gpu.uniform_buffer, &uniforms);
        }
    }

    fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(gpu) = &self.gpu else {
            return;
        };
        pass.set_pipeline(&gpu.pipeline);
        pass.set_bind_group(0, &gpu.bind_group, &[]);
        pass.set_vertex_buffer(0, gpu.vertex_buffer.slice(..));
        pass.set_index_buffer(gpu.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..gpu.index_count, 0, 0..1);
    }
}
