//! Terrain Pass
//!
//! Uploads each tile's mesh, keeps its uniforms current, and issues one
//! `draw_indexed` per frustum-visible chunk.
//!
//! Two pipelines share the vertex buffer: a filled triangle-list pipeline
//! and a line-list pipeline over the wireframe index buffer. Tile buffers
//! are re-uploaded whenever the world's mesh revision changes.

use super::gpu_context::{create_index_buffer, create_uniform_buffer, create_vertex_buffer, write_buffer};
use super::pipeline::{
    PipelineSettings, create_render_pipeline, create_uniform_bind_group,
    create_uniform_bind_group_layout,
};
use super::render_pass::{FrameContext, RenderContext, RenderPass, RenderPassPriority};
use super::shader_loader::{TERRAIN_SHADER, create_shader_module};
use super::uniforms::TerrainUniforms;
use crate::error::Result;
use crate::terrain::TerrainVertex;
use crate::world::{DrawRange, MapTile, TileDraw};

/// GPU buffers for one map tile
struct TileBuffers {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    wireframe_index_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

struct TerrainPipelines {
    bind_group_layout: wgpu::BindGroupLayout,
    fill: wgpu::RenderPipeline,
    wireframe: wgpu::RenderPipeline,
}

/// Terrain render pass
pub struct TerrainPass {
    pipelines: Option<TerrainPipelines>,
    tiles: Vec<TileBuffers>,
    /// Mesh revision the tile buffers were built from
    uploaded_revision: Option<u64>,
    draws: Vec<TileDraw>,
    wireframe: bool,
}

impl TerrainPass {
    pub fn new() -> Self {
        Self {
            pipelines: None,
            tiles: Vec::new(),
            uploaded_revision: None,
            draws: Vec::new(),
            wireframe: false,
        }
    }

    fn upload_tile(ctx: &RenderContext, layout: &wgpu::BindGroupLayout, tile: &MapTile) -> TileBuffers {
        let mesh = tile.mesh();
        let uniform_buffer =
            create_uniform_buffer(ctx.device, "Terrain Uniforms", &TerrainUniforms::default());
        let bind_group =
            create_uniform_bind_group(ctx.device, "Terrain Bind Group", layout, &uniform_buffer);

        TileBuffers {
            vertex_buffer: create_vertex_buffer(ctx.device, "Terrain Vertices", &mesh.vertices),
            index_buffer: create_index_buffer(ctx.device, "Terrain Indices", &mesh.indices),
            wireframe_index_buffer: create_index_buffer(
                ctx.device,
                "Terrain Wireframe Indices",
                &mesh.wireframe_indices,
            ),
            uniform_buffer,
            bind_group,
        }
    }
}

impl Default for TerrainPass {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderPass for TerrainPass {
    fn name(&self) -> &'static str {
        "terrain"
    }

    fn priority(&self) -> RenderPassPriority {
        RenderPassPriority::Geometry
    }

    fn initialize(&mut self, ctx: &RenderContext) -> Result<()> {
        let shader = create_shader_module(ctx.device, "Terrain Shader", TERRAIN_SHADER);
        let bind_group_layout =
            create_uniform_bind_group_layout(ctx.device, "Terrain Bind Group Layout");

        let fill = create_render_pipeline(
            ctx,
            PipelineSettings {
                label: "Terrain",
                shader: &shader,
                bind_group_layout: &bind_group_layout,
                vertex_layout: TerrainVertex::layout(),
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
            },
        );
        let wireframe = create_render_pipeline(
            ctx,
            PipelineSettings {
                label: "Terrain Wireframe",
                shader: &shader,
                bind_group_layout: &bind_group_layout,
                vertex_layout: TerrainVertex::layout(),
                topology: wgpu::PrimitiveTopology::LineList,
                cull_mode: None,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
            },
        );

        self.pipelines = Some(TerrainPipelines {
            bind_group_layout,
            fill,
            wireframe,
        });
        Ok(())
    }

    fn update(&mut self, ctx: &RenderContext, frame: &FrameContext) {
        let Some(pipelines) = &self.pipelines else {
            return;
        };
        let world = frame.world;

        if self.uploaded_revision != Some(world.mesh_revision()) {
            self.tiles = world
                .tiles()
                .iter()
                .map(|tile| Self::upload_tile(ctx, &pipelines.bind_group_layout, tile))
                .collect();
            self.uploaded_revision = Some(world.mesh_revision());
            log::debug!("Uploaded {} terrain tile(s)", self.tiles.len());
        }

        for (tile, buffers) in world.tiles().iter().zip(&self.tiles) {
            let uniforms = TerrainUniforms::new(
                frame.camera,
                tile.model(),
                world.frustum(),
                (ctx.width, ctx.height),
                tile.config().displacement_factor,
                world.wireframe(),
            );
            write_buffer(ctx.queue, &buffers.uniform_buffer, &uniforms);
        }

        self.wireframe = world.wireframe();
        self.draws = world.draw_list();
    }

    fn render(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(pipelines) = &self.pipelines else {
            return;
        };

        pass.set_pipeline(if self.wireframe {
            &pipelines.wireframe
        } else {
            &pipelines.fill
        });

        for draw in &self.draws {
            let Some(buffers) = self.tiles.get(draw.tile) else {
                continue;
            };
            let index_buffer = if self.wireframe {
                &buffers.wireframe_index_buffer
            } else {
                &buffers.index_buffer
            };

            pass.set_bind_group(0, &buffers.bind_group, &[]);
            pass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
            pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            for &DrawRange {
                first_index,
                index_count,
            } in &draw.ranges
            {
                pass.draw_indexed(first_index..first_index + index_count, 0, 0..1);
            }
        }
    }
}
