//! View-Frustum Culling
//!
//! Extracts the six clip planes from a view-projection matrix and tests
//! spheres and axis-aligned boxes against them.
//!
//! ## Plane Layout
//!
//! Planes are stored as `Vec4(n.x, n.y, n.z, d)` with a unit-length normal
//! pointing into the frustum, so `dot(n, p) + d` is the signed distance of
//! `p` from the plane. Extraction follows Gribb/Hartmann, adjusted for
//! wgpu's 0..1 depth range: the near plane is row 2 alone instead of
//! row 3 + row 2.

use glam::{Mat4, Vec3, Vec4};

/// Number of frustum planes
pub const FRUSTUM_PLANE_COUNT: usize = 6;

/// Frustum plane identifiers (index into `Frustum::planes()`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumSide {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
    /// Near plane
    Back = 4,
    /// Far plane
    Front = 5,
}

/// Six-plane view volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    planes: [Vec4; FRUSTUM_PLANE_COUNT],
}

impl Default for Frustum {
    /// Unit clip cube of an identity view-projection.
    fn default() -> Self {
        Self::from_matrix(Mat4::IDENTITY)
    }
}

impl Frustum {
    /// Build a frustum from a `projection * view` matrix.
    pub fn from_matrix(view_proj: Mat4) -> Self {
        let mut frustum = Self {
            planes: [Vec4::ZERO; FRUSTUM_PLANE_COUNT],
        };
        frustum.update(view_proj);
        frustum
    }

    /// Re-extract the planes from a new `projection * view` matrix.
    pub fn update(&mut self, view_proj: Mat4) {
        let r0 = view_proj.row(0);
        let r1 = view_proj.row(1);
        let r2 = view_proj.row(2);
        let r3 = view_proj.row(3);

        self.planes[FrustumSide::Left as usize] = r3 + r0;
        self.planes[FrustumSide::Right as usize] = r3 - r0;
        self.planes[FrustumSide::Top as usize] = r3 - r1;
        self.planes[FrustumSide::Bottom as usize] = r3 + r1;
        self.planes[FrustumSide::Back as usize] = r2;
        self.planes[FrustumSide::Front as usize] = r3 - r2;

        for plane in &mut self.planes {
            let length = plane.truncate().length();
            if length > f32::EPSILON {
                *plane /= length;
            }
        }
    }

    /// All six planes, in `FrustumSide` order (GPU upload layout).
    pub fn planes(&self) -> [Vec4; FRUSTUM_PLANE_COUNT] {
        self.planes
    }

    /// Plane for a given side.
    pub fn plane(&self, side: FrustumSide) -> Vec4 {
        self.planes[side as usize]
    }

    /// Plane by raw index; out-of-range indices yield the zero vector.
    pub fn plane_by_index(&self, index: usize) -> Vec4 {
        self.planes.get(index).copied().unwrap_or(Vec4::ZERO)
    }

    /// Returns `false` only if the sphere lies entirely outside one plane.
    pub fn check_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.truncate().dot(center) + plane.w > -radius)
    }

    /// Conservative box test: returns `false` only if the box lies entirely
    /// behind one plane (its most-inside corner is outside).
    pub fn check_aabb(&self, min: Vec3, max: Vec3) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            let positive = Vec3::new(
                if normal.x >= 0.0 { max.x } else { min.x },
                if normal.y >= 0.0 { max.y } else { min.y },
                if normal.z >= 0.0 { max.z } else { min.z },
            );
            normal.dot(positive) + plane.w >= 0.0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looking_down_negative_z() -> Frustum {
        let proj = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        Frustum::from_matrix(proj * view)
    }

    #[test]
    fn test_planes_are_normalized() {
        let frustum = looking_down_negative_z();
        for plane in frustum.planes() {
            assert!((plane.truncate().length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_near_plane_faces_forward() {
        let frustum = looking_down_negative_z();
        let near = frustum.plane(FrustumSide::Back);
        // Normal points into the frustum (-Z), distance ~ near plane
        assert!(near.z < -0.99);
        assert!((near.w + 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_sphere_inside_and_behind() {
        let frustum = looking_down_negative_z();
        assert!(frustum.check_sphere(Vec3::new(0.0, 0.0, -10.0), 1.0));
        assert!(!frustum.check_sphere(Vec3::new(0.0, 0.0, 10.0), 1.0));
        // Beyond the far plane
        assert!(!frustum.check_sphere(Vec3::new(0.0, 0.0, -200.0), 1.0));
        // Straddling the near plane
        assert!(frustum.check_sphere(Vec3::new(0.0, 0.0, 0.5), 1.0));
    }

    #[test]
    fn test_aabb_culling() {
        let frustum = looking_down_negative_z();
        assert!(frustum.check_aabb(Vec3::new(-1.0, -1.0, -11.0), Vec3::new(1.0, 1.0, -9.0)));
        assert!(!frustum.check_aabb(Vec3::new(-1.0, -1.0, 5.0), Vec3::new(1.0, 1.0, 7.0)));
        // Far off to the side
        assert!(!frustum.check_aabb(Vec3::new(100.0, -1.0, -11.0), Vec3::new(102.0, 1.0, -9.0)));
        // Large box enclosing the camera
        assert!(frustum.check_aabb(Vec3::splat(-50.0), Vec3::splat(50.0)));
    }

    #[test]
    fn test_plane_by_index_out_of_range() {
        let frustum = looking_down_negative_z();
        assert_eq!(frustum.plane_by_index(6), Vec4::ZERO);
        assert_eq!(frustum.plane_by_index(0), frustum.plane(FrustumSide::Left));
    }
}
