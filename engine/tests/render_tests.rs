//! Render Tests - Uniform Layouts, Shaders and Pass Ordering
//!
//! GPU-free checks: buffer layouts match the WGSL structs, the shaders
//! parse and validate, and the frame-level helpers behave.

use glam::{Mat4, Vec3};
use terrain_editor_engine::camera::Camera;
use terrain_editor_engine::render::{
    Frustum, FrustumSide, LIGHT_POSITION, RenderPassPriority, SKY_SHADER, SkyUniforms, TERRAIN_SHADER,
    TerrainUniforms, select_sample_count,
};
use terrain_editor_engine::terrain::TerrainVertex;
use terrain_editor_engine::world::{SkySettings, SkyVertex};

fn validate_wgsl(source: &str) {
    let module = naga::front::wgsl::parse_str(source).expect("WGSL parse failed");
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).expect("WGSL validation failed");
}

// ============================================================================
// Shaders
// ============================================================================

#[test]
fn test_terrain_shader_validates() {
    validate_wgsl(TERRAIN_SHADER);
}

#[test]
fn test_sky_shader_validates() {
    validate_wgsl(SKY_SHADER);
}

#[test]
fn test_shaders_declare_entry_points() {
    for source in [TERRAIN_SHADER, SKY_SHADER] {
        assert!(source.contains("fn vs_main"));
        assert!(source.contains("fn fs_main"));
    }
}

#[test]
fn test_terrain_lighting_shares_eye_space() {
    // Normal, light and eye position all go through modelview
    assert!(TERRAIN_SHADER.contains("uniforms.modelview * vec4<f32>(in.position, 1.0)"));
    assert!(TERRAIN_SHADER.contains("uniforms.modelview * vec4<f32>(in.normal, 0.0)"));
    assert!(TERRAIN_SHADER.contains("uniforms.modelview * vec4<f32>(uniforms.light_pos.xyz, 1.0)"));
    assert!(TERRAIN_SHADER.contains("out.view_vec = -eye_pos.xyz"));
}

// ============================================================================
// Uniform Layouts
// ============================================================================

#[test]
fn test_uniform_sizes_match_wgsl() {
    assert_eq!(std::mem::size_of::<TerrainUniforms>(), 272);
    assert_eq!(std::mem::size_of::<SkyUniforms>(), 112);
    assert_eq!(std::mem::size_of::<TerrainUniforms>() % 16, 0);
}

#[test]
fn test_vertex_strides() {
    assert_eq!(TerrainVertex::layout().array_stride, 32);
    assert_eq!(SkyVertex::layout().array_stride, 20);
}

#[test]
fn test_terrain_uniforms_from_camera() {
    let camera = Camera::with_transform(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO);
    let model = Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0));
    let frustum = Frustum::from_matrix(camera.view_projection_matrix());

    let uniforms = TerrainUniforms::new(&camera, model, &frustum, (800, 600), 24.0, true);

    assert_eq!(uniforms.light_pos, LIGHT_POSITION);
    assert_eq!(uniforms.viewport_dim, [800.0, 600.0]);
    assert_eq!(uniforms.displacement_factor, 24.0);
    assert_eq!(uniforms.wireframe, 1);
    assert_eq!(
        uniforms.frustum_planes[FrustumSide::Left as usize],
        frustum.plane(FrustumSide::Left).to_array()
    );

    // The model origin lands at model offset minus eye position
    let modelview = Mat4::from_cols_array_2d(&uniforms.modelview);
    let origin = modelview.transform_point3(Vec3::ZERO);
    assert!((origin - Vec3::new(3.0, -5.0, -10.0)).length() < 1e-4);
}

#[test]
fn test_sky_uniforms_ignore_camera_position() {
    let sky = SkySettings::default();
    let near = Camera::with_transform(Vec3::ZERO, Vec3::new(30.0, 10.0, 0.0));
    let far = Camera::with_transform(Vec3::new(500.0, 80.0, -250.0), Vec3::new(30.0, 10.0, 0.0));

    let a = SkyUniforms::new(&near, &sky);
    let b = SkyUniforms::new(&far, &sky);
    assert_eq!(a.mvp, b.mvp);
    assert_eq!(a.horizon[3], 1.0);
    assert_eq!(a.horizon[..3], sky.horizon[..]);
}

// ============================================================================
// GPU Context Helpers
// ============================================================================

#[test]
fn test_sample_count_selection() {
    use wgpu::TextureFormatFeatureFlags as Flags;

    assert_eq!(select_sample_count(false, Flags::all()), 1);
    assert_eq!(select_sample_count(true, Flags::all()), 16);
    assert_eq!(select_sample_count(true, Flags::MULTISAMPLE_X4 | Flags::MULTISAMPLE_X8), 8);
    assert_eq!(select_sample_count(true, Flags::MULTISAMPLE_X4), 4);
    assert_eq!(select_sample_count(true, Flags::empty()), 1);
}

#[test]
fn test_pass_priorities_order_sky_first() {
    assert!(RenderPassPriority::Background < RenderPassPriority::Geometry);
}
