//! Uniform Structs for GPU Shaders
//!
//! GPU-compatible uniform buffer structures that must match the WGSL layout
//! in `shaders/terrain.wgsl` and `shaders/sky.wgsl` exactly.

use glam::Mat4;

use crate::camera::Camera;
use crate::render::culling::{FRUSTUM_PLANE_COUNT, Frustum};
use crate::world::SkySettings;

/// Light position used for terrain shading (object space)
pub const LIGHT_POSITION: [f32; 4] = [-48.0, -40.0, 46.0, 0.0];
/// Target triangles per edge for screen-space tessellation metrics
pub const TESSELLATION_FACTOR: f32 = 0.75;
/// Target edge length in pixels for screen-space tessellation metrics
pub const TESSELLATED_EDGE_SIZE: f32 = 20.0;

/// Terrain uniforms.
///
/// WGSL layout (272 bytes):
///   offset   0: projection (mat4x4<f32>)
///   offset  64: modelview (mat4x4<f32>)
///   offset 128: light_pos (vec4<f32>)
///   offset 144: frustum_planes (array<vec4<f32>, 6>)
///   offset 240: displacement_factor (f32)
///   offset 244: tessellation_factor (f32)
///   offset 248: viewport_dim (vec2<f32>)
///   offset 256: tessellated_edge_size (f32)
///   offset 260: wireframe (u32)
///   offset 264: _pad (2 x u32), struct rounded up to 16-byte alignment
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainUniforms {
    pub projection: [[f32; 4]; 4],
    pub modelview: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
    pub frustum_planes: [[f32; 4]; FRUSTUM_PLANE_COUNT],
    pub displacement_factor: f32,
    pub tessellation_factor: f32,
    pub viewport_dim: [f32; 2],
    pub tessellated_edge_size: f32,
    /// 1 when drawing the line-list wireframe
    pub wireframe: u32,
    pub _pad: [u32; 2],
}

static_assertions::assert_eq_size!(TerrainUniforms, [u8; 272]);

impl Default for TerrainUniforms {
    fn default() -> Self {
        Self {
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            modelview: Mat4::IDENTITY.to_cols_array_2d(),
            light_pos: LIGHT_POSITION,
            frustum_planes: [[0.0; 4]; FRUSTUM_PLANE_COUNT],
            displacement_factor: 32.0,
            tessellation_factor: TESSELLATION_FACTOR,
            viewport_dim: [1.0, 1.0],
            tessellated_edge_size: TESSELLATED_EDGE_SIZE,
            wireframe: 0,
            _pad: [0; 2],
        }
    }
}

impl TerrainUniforms {
    /// Per-tile uniforms for the current camera.
    pub fn new(
        camera: &Camera,
        model: Mat4,
        frustum: &Frustum,
        viewport: (u32, u32),
        displacement_factor: f32,
        wireframe: bool,
    ) -> Self {
        Self {
            projection: camera.projection_matrix().to_cols_array_2d(),
            modelview: (camera.view_matrix() * model).to_cols_array_2d(),
            frustum_planes: frustum.planes().map(|plane| plane.to_array()),
            displacement_factor,
            viewport_dim: [viewport.0 as f32, viewport.1 as f32],
            wireframe: wireframe as u32,
            ..Default::default()
        }
    }
}

/// Sky uniforms.
///
/// WGSL layout (112 bytes):
///   offset  0: mvp (mat4x4<f32>)
///   offset 64: zenith (vec4<f32>)
///   offset 80: horizon (vec4<f32>)
///   offset 96: ground (vec4<f32>)
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SkyUniforms {
    pub mvp: [[f32; 4]; 4],
    pub zenith: [f32; 4],
    pub horizon: [f32; 4],
    pub ground: [f32; 4],
}

static_assertions::assert_eq_size!(SkyUniforms, [u8; 112]);

impl SkyUniforms {
    /// The sphere follows the camera: only the view rotation is applied.
    pub fn new(camera: &Camera, sky: &SkySettings) -> Self {
        let rgba = |c: [f32; 3]| [c[0], c[1], c[2], 1.0];
        Self {
            mvp: (camera.projection_matrix() * camera.rotation_only_view_matrix())
                .to_cols_array_2d(),
            zenith: rgba(sky.zenith),
            horizon: rgba(sky.horizon),
            ground: rgba(sky.ground),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_terrain_uniforms_defaults() {
        let uniforms = TerrainUniforms::default();
        assert_eq!(uniforms.light_pos, [-48.0, -40.0, 46.0, 0.0]);
        assert_eq!(uniforms.tessellation_factor, 0.75);
        assert_eq!(uniforms.tessellated_edge_size, 20.0);
    }

    #[test]
    fn test_terrain_uniforms_from_camera() {
        let camera = Camera::new();
        let frustum = Frustum::from_matrix(camera.view_projection_matrix());
        let uniforms =
            TerrainUniforms::new(&camera, Mat4::IDENTITY, &frustum, (1280, 800), 32.0, true);
        assert_eq!(uniforms.viewport_dim, [1280.0, 800.0]);
        assert_eq!(uniforms.wireframe, 1);
        assert_eq!(uniforms.modelview, camera.view_matrix().to_cols_array_2d());
        assert_eq!(uniforms.frustum_planes[0], frustum.planes()[0].to_array());
    }

    #[test]
    fn test_sky_ignores_camera_translation() {
        let sky = SkySettings::default();
        let a = SkyUniforms::new(&Camera::with_transform(Vec3::ZERO, Vec3::new(30.0, 10.0, 0.0)), &sky);
        let b = SkyUniforms::new(
            &Camera::with_transform(Vec3::new(100.0, 5.0, -40.0), Vec3::new(30.0, 10.0, 0.0)),
            &sky,
        );
        assert_eq!(a.mvp, b.mvp);
        assert_eq!(a.horizon[3], 1.0);
    }
}
