//! Terrain Tests - Heightmaps, Mesh Generation and Culling
//!
//! Loads heightmaps from disk, builds tiles from them and checks which
//! chunks survive frustum culling for a few camera placements.

use glam::Vec3;
use image::{ImageBuffer, Luma};
use terrain_editor_engine::camera::Camera;
use terrain_editor_engine::error::EditorError;
use terrain_editor_engine::terrain::{Heightmap, TerrainMeshConfig, generate_terrain_mesh};
use terrain_editor_engine::world::World;

fn small_config() -> TerrainMeshConfig {
    TerrainMeshConfig {
        patch_size: 8,
        chunks: 2,
        ..Default::default()
    }
}

fn save_png(dir: &tempfile::TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let image: ImageBuffer<Luma<u16>, Vec<u16>> =
        ImageBuffer::from_fn(width, height, |x, y| Luma([(x * 1000 + y) as u16]));
    image.save(&path).unwrap();
    path
}

// ============================================================================
// Heightmap Loading
// ============================================================================

#[test]
fn test_load_png_heightmap() {
    let dir = tempfile::tempdir().unwrap();
    let path = save_png(&dir, "height.png", 8, 8);

    let map = Heightmap::load(&path, 4).unwrap();
    assert_eq!(map.dimension(), 8);
    assert_eq!(map.scale(), 2);
    // Patch coordinate (1, 0) is sample (2, 0)
    assert!((map.height(1, 0) - 2000.0 / 65535.0).abs() < 1e-6);
    // Past the edge clamps to the last patch row/column
    assert_eq!(map.height(9, 9), map.height(3, 3));
}

#[test]
fn test_load_rejects_non_square_image() {
    let dir = tempfile::tempdir().unwrap();
    let path = save_png(&dir, "wide.png", 8, 4);
    assert!(matches!(
        Heightmap::load(&path, 4),
        Err(EditorError::InvalidHeightmap(_))
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Heightmap::load(dir.path().join("missing.png"), 4);
    assert!(matches!(result, Err(EditorError::Image { .. })));
}

#[test]
fn test_from_samples_validation() {
    assert!(Heightmap::from_samples(4, vec![0; 15], 2).is_err());
    assert!(Heightmap::from_samples(4, vec![0; 16], 0).is_err());
    assert!(Heightmap::from_samples(4, vec![0; 16], 8).is_err());
    assert!(Heightmap::from_samples(4, vec![0; 16], 4).is_ok());
}

#[test]
fn test_lowest_and_highest_height() {
    let mut samples = vec![1000u16; 16];
    samples[0] = 0;
    samples[10] = u16::MAX;
    let map = Heightmap::from_samples(4, samples, 2).unwrap();
    // Only even sample coordinates are on the patch grid
    assert_eq!(map.lowest_height(), 0.0);
    assert_eq!(map.highest_height(), 1.0);
}

#[test]
fn test_procedural_heightmap_in_range() {
    let map = Heightmap::procedural(32, 8, 0.05).unwrap();
    assert_eq!(map.dimension(), 32);
    assert!(map.lowest_height() >= 0.0);
    assert!(map.highest_height() <= 1.0);
    assert!(map.highest_height() > map.lowest_height());
}

// ============================================================================
// Mesh Generation
// ============================================================================

#[test]
fn test_subdivision_refines_grid() {
    let map = Heightmap::procedural(16, 8, 0.1).unwrap();
    let coarse = generate_terrain_mesh(&map, &small_config()).unwrap();
    let fine = generate_terrain_mesh(&map, &small_config().with_subdivisions(3)).unwrap();

    assert_eq!(coarse.resolution, 8);
    assert_eq!(fine.resolution, 22);
    assert_eq!(fine.triangle_count(), 21 * 21 * 2);

    // Same footprint at every level
    let (coarse_min, coarse_max) = coarse.bounds();
    let (fine_min, fine_max) = fine.bounds();
    assert!(((coarse_max.x - coarse_min.x) - (fine_max.x - fine_min.x)).abs() < 1e-3);
}

#[test]
fn test_indices_in_bounds() {
    let map = Heightmap::procedural(16, 8, 0.1).unwrap();
    let mesh = generate_terrain_mesh(&map, &small_config().with_subdivisions(2)).unwrap();
    let count = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < count));
    assert!(mesh.wireframe_indices.iter().all(|&i| i < count));
}

#[test]
fn test_chunk_bounds_contain_chunk_vertices() {
    let map = Heightmap::procedural(16, 8, 0.1).unwrap();
    let mesh = generate_terrain_mesh(&map, &small_config()).unwrap();
    for chunk in &mesh.chunks {
        let range = chunk.index_offset as usize..(chunk.index_offset + chunk.index_count) as usize;
        for &index in &mesh.indices[range] {
            let p = Vec3::from(mesh.vertices[index as usize].position);
            assert!(p.cmpge(chunk.min - 1e-4).all());
            assert!(p.cmple(chunk.max + 1e-4).all());
        }
    }
}

#[test]
fn test_normals_are_unit_length() {
    let map = Heightmap::procedural(16, 8, 0.1).unwrap();
    let mesh = generate_terrain_mesh(&map, &small_config()).unwrap();
    for vertex in &mesh.vertices {
        let n = Vec3::from(vertex.normal);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(n.y >= 0.0);
    }
}

// ============================================================================
// World Culling
// ============================================================================

fn flat_world() -> World {
    let map = Heightmap::from_samples(16, vec![0; 256], 8).unwrap();
    World::new(map, small_config()).unwrap()
}

fn visible_ranges(world: &World) -> usize {
    world.draw_list().iter().map(|draw| draw.ranges.len()).sum()
}

#[test]
fn test_terrain_in_view_is_drawn() {
    let mut world = flat_world();
    let camera = Camera::with_transform(Vec3::new(0.0, 10.0, 30.0), Vec3::new(0.0, 15.0, 0.0));
    world.update(&camera);
    assert!(visible_ranges(&world) > 0);
}

#[test]
fn test_terrain_behind_camera_is_culled() {
    let mut world = flat_world();
    let camera = Camera::with_transform(Vec3::new(0.0, 10.0, 30.0), Vec3::new(180.0, 0.0, 0.0));
    world.update(&camera);
    assert_eq!(visible_ranges(&world), 0);
}

#[test]
fn test_overhead_camera_sees_every_chunk() {
    let mut world = flat_world();
    let camera = Camera::with_transform(Vec3::new(0.0, 60.0, 0.0), Vec3::new(0.0, 90.0, 0.0));
    world.update(&camera);
    assert_eq!(visible_ranges(&world), 4);
}

#[test]
fn test_wireframe_draws_line_ranges() {
    let mut world = flat_world();
    let camera = Camera::with_transform(Vec3::new(0.0, 60.0, 0.0), Vec3::new(0.0, 90.0, 0.0));
    world.update(&camera);
    world.set_wireframe(true);

    let tile = &world.tiles()[0];
    let drawn: u32 = world.draw_list()[0].ranges.iter().map(|r| r.index_count).sum();
    assert_eq!(drawn as usize, tile.mesh().wireframe_indices.len());
}

#[test]
fn test_tessellation_toggle_keeps_configured_level() {
    let map = Heightmap::from_samples(16, vec![0; 256], 8).unwrap();
    let mut world = World::new(map, small_config().with_subdivisions(4)).unwrap();
    assert_eq!(world.tiles()[0].config().subdivisions, 4);

    world.set_tessellation(false).unwrap();
    assert_eq!(world.tiles()[0].config().subdivisions, 1);
    world.set_tessellation(true).unwrap();
    assert_eq!(world.tiles()[0].config().subdivisions, 4);
    assert_eq!(world.mesh_revision(), 2);

    // Setting the current state again rebuilds nothing
    world.set_tessellation(true).unwrap();
    assert_eq!(world.mesh_revision(), 2);
}
