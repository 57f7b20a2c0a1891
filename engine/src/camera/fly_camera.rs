//! Fly Camera Module
//!
//! Free-flying editor camera driven by Euler angles in degrees.
//!
//! Key features:
//! - Yaw/pitch/roll stored in degrees, each wrapped into [-360, 360]
//! - View matrix = roll * pitch * yaw * translate(-position)
//! - Walk/strafe move along the horizontal plane only (height is kept)
//! - Projection uses wgpu clip space (right-handed, depth 0..1)

use glam::{Mat3, Mat4, Vec3};

/// Default camera position (overlooks the terrain tile from the south).
pub const DEFAULT_POSITION: Vec3 = Vec3::new(18.0, 22.5, 57.5);
/// Default rotation in degrees (x = yaw, y = pitch, z = roll).
pub const DEFAULT_ROTATION: Vec3 = Vec3::new(0.0, 15.0, 0.0);
/// Pixels of mouse drag per degree of rotation.
pub const DEFAULT_MOUSE_DIVISOR: f32 = 10.0;

/// Wrap an angle in degrees into [-360, 360].
///
/// Values already inside the range are returned untouched, so 360 and -360
/// are both valid results.
pub fn wrap_degrees(value: f32) -> f32 {
    if value > 360.0 {
        let wrapped = value % 360.0;
        if wrapped == 0.0 { 360.0 } else { wrapped }
    } else if value < -360.0 {
        let wrapped = value % 360.0;
        if wrapped == 0.0 { -360.0 } else { wrapped }
    } else {
        value
    }
}

/// Relative float comparison, tolerant to about five significant digits.
fn fuzzy_eq(a: f32, b: f32) -> bool {
    (a - b).abs() * 100_000.0 <= a.abs().min(b.abs())
}

/// Editor fly camera.
///
/// ## Usage
/// ```rust,ignore
/// let mut camera = Camera::new();
/// camera.set_perspective_projection(60.0, width as f32 / height as f32, 0.1, 1024.0);
///
/// // Left-drag in the viewport
/// camera.apply_mouse_drag(dx, dy);
///
/// // W pressed
/// camera.walk(0.1);
///
/// let view_proj = camera.view_projection_matrix();
/// ```
#[derive(Clone, Debug)]
pub struct Camera {
    position: Vec3,
    /// Degrees: x = yaw, y = pitch, z = roll
    rotation: Vec3,

    near_plane: f32,
    far_plane: f32,
    /// Vertical field of view in degrees
    field_of_view: f32,
    aspect_ratio: f32,

    movement_speed: f32,
    rotation_speed: f32,
    mouse_divisor: f32,

    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            position: DEFAULT_POSITION,
            rotation: DEFAULT_ROTATION,
            near_plane: 0.1,
            far_plane: 1024.0,
            field_of_view: 60.0,
            aspect_ratio: 1.0,
            movement_speed: 1.0,
            rotation_speed: 1.0,
            mouse_divisor: DEFAULT_MOUSE_DIVISOR,
            view_matrix: Mat4::IDENTITY,
            projection_matrix: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }
}

impl Camera {
    /// Create a camera with default position, rotation and projection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at a custom position and rotation (degrees).
    pub fn with_transform(position: Vec3, rotation: Vec3) -> Self {
        let mut camera = Self {
            position,
            rotation: Vec3::new(
                wrap_degrees(rotation.x),
                wrap_degrees(rotation.y),
                wrap_degrees(rotation.z),
            ),
            ..Default::default()
        };
        camera.update_view_matrix();
        camera
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation in degrees (x = yaw, y = pitch, z = roll).
    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    #[inline]
    pub fn movement_speed(&self) -> f32 {
        self.movement_speed
    }

    #[inline]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    #[inline]
    pub fn set_movement_speed(&mut self, value: f32) {
        self.movement_speed = value;
    }

    #[inline]
    pub fn set_rotation_speed(&mut self, value: f32) {
        self.rotation_speed = value;
    }

    /// Set how many pixels of drag make one degree of rotation.
    #[inline]
    pub fn set_mouse_divisor(&mut self, value: f32) {
        if value > 0.0 {
            self.mouse_divisor = value;
        }
    }

    #[inline]
    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    #[inline]
    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    #[inline]
    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// `projection * view`
    #[inline]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// View matrix without translation, for geometry that follows the camera (sky).
    pub fn rotation_only_view_matrix(&self) -> Mat4 {
        Mat4::from_mat3(self.rotation_matrix())
    }

    /// World-to-camera rotation: roll * pitch * yaw.
    fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_rotation_z(self.rotation.z.to_radians())
            * Mat3::from_rotation_x(self.rotation.y.to_radians())
            * Mat3::from_rotation_y(self.rotation.x.to_radians())
    }

    /// World-space direction the camera looks along (camera -Z).
    pub fn forward(&self) -> Vec3 {
        (self.rotation_matrix().transpose() * Vec3::NEG_Z).normalize()
    }

    /// World-space camera +X axis.
    pub fn right(&self) -> Vec3 {
        (self.rotation_matrix().transpose() * Vec3::X).normalize()
    }

    /// World-space camera +Y axis.
    pub fn up(&self) -> Vec3 {
        (self.rotation_matrix().transpose() * Vec3::Y).normalize()
    }

    /// Place the camera at `position`.
    pub fn move_to(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    /// Offset the camera by a world-space delta.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        self.update_view_matrix();
    }

    /// Move along the forward direction projected on the XZ plane.
    pub fn walk(&mut self, amount: f32) {
        let forward = self.forward();
        self.position.x += amount * forward.x;
        self.position.z += amount * forward.z;
        self.update_view_matrix();
    }

    /// Move along the right direction projected on the XZ plane.
    pub fn strafe(&mut self, amount: f32) {
        let right = self.right();
        self.position.x += amount * right.x;
        self.position.z += amount * right.z;
        self.update_view_matrix();
    }

    /// Rotate around the world Y axis by `angle` degrees.
    pub fn yaw(&mut self, angle: f32) {
        self.rotation.x = wrap_degrees(self.rotation.x + angle);
        self.update_view_matrix();
    }

    /// Rotate around the camera X axis by `angle` degrees.
    pub fn pitch(&mut self, angle: f32) {
        self.rotation.y = wrap_degrees(self.rotation.y + angle);
        self.update_view_matrix();
    }

    /// Rotate around the view axis by `angle` degrees.
    pub fn roll(&mut self, angle: f32) {
        self.rotation.z = wrap_degrees(self.rotation.z + angle);
        self.update_view_matrix();
    }

    /// Apply a (yaw, pitch, roll) delta in degrees.
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation = Vec3::new(
            wrap_degrees(self.rotation.x + delta.x),
            wrap_degrees(self.rotation.y + delta.y),
            wrap_degrees(self.rotation.z + delta.z),
        );
        self.update_view_matrix();
    }

    /// Turn a mouse drag (pixels) into pitch and yaw.
    ///
    /// Returns `true` if the camera changed.
    pub fn apply_mouse_drag(&mut self, dx: f32, dy: f32) -> bool {
        let scale = self.rotation_speed / self.mouse_divisor;
        if dy != 0.0 {
            self.pitch(dy * scale);
        }
        if dx != 0.0 {
            self.yaw(dx * scale);
        }
        dx != 0.0 || dy != 0.0
    }

    pub fn set_near_plane(&mut self, value: f32) {
        if fuzzy_eq(self.near_plane, value) {
            return;
        }
        self.near_plane = value;
        self.update_projection_matrix();
    }

    pub fn set_far_plane(&mut self, value: f32) {
        if fuzzy_eq(self.far_plane, value) {
            return;
        }
        self.far_plane = value;
        self.update_projection_matrix();
    }

    /// Set the vertical field of view in degrees.
    pub fn set_field_of_view(&mut self, value: f32) {
        if fuzzy_eq(self.field_of_view, value) {
            return;
        }
        self.field_of_view = value;
        self.update_projection_matrix();
    }

    pub fn set_aspect_ratio(&mut self, value: f32) {
        if fuzzy_eq(self.aspect_ratio, value) {
            return;
        }
        self.aspect_ratio = value;
        self.update_projection_matrix();
    }

    /// Set all projection parameters at once (fov in degrees).
    pub fn set_perspective_projection(&mut self, fov: f32, aspect: f32, near: f32, far: f32) {
        self.field_of_view = fov;
        self.aspect_ratio = aspect;
        self.near_plane = near;
        self.far_plane = far;
        self.update_projection_matrix();
    }

    fn update_projection_matrix(&mut self) {
        self.projection_matrix = Mat4::perspective_rh(
            self.field_of_view.to_radians(),
            self.aspect_ratio.max(f32::EPSILON),
            self.near_plane,
            self.far_plane,
        );
    }

    fn update_view_matrix(&mut self) {
        self.view_matrix =
            Mat4::from_mat3(self.rotation_matrix()) * Mat4::from_translation(-self.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(45.0), 45.0);
        assert_eq!(wrap_degrees(360.0), 360.0);
        assert_eq!(wrap_degrees(-360.0), -360.0);
        assert!((wrap_degrees(370.0) - 10.0).abs() < EPS);
        assert!((wrap_degrees(-370.0) + 10.0).abs() < EPS);
        assert_eq!(wrap_degrees(720.0), 360.0);
    }

    #[test]
    fn test_fuzzy_eq() {
        assert!(fuzzy_eq(60.0, 60.0));
        assert!(fuzzy_eq(1024.0, 1024.000_1));
        assert!(!fuzzy_eq(60.0, 61.0));
    }

    #[test]
    fn test_identity_rotation_axes() {
        let camera = Camera::with_transform(Vec3::ZERO, Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Z).length() < EPS);
        assert!((camera.right() - Vec3::X).length() < EPS);
        assert!((camera.up() - Vec3::Y).length() < EPS);
    }

    #[test]
    fn test_yaw_90_looks_along_positive_x() {
        let mut camera = Camera::with_transform(Vec3::ZERO, Vec3::ZERO);
        camera.yaw(90.0);
        assert!((camera.forward() - Vec3::X).length() < EPS);
    }

    #[test]
    fn test_positive_pitch_looks_down() {
        let mut camera = Camera::with_transform(Vec3::ZERO, Vec3::ZERO);
        camera.pitch(30.0);
        assert!(camera.forward().y < 0.0);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = Camera::new();
        let eye = camera.view_matrix().transform_point3(camera.position());
        assert!(eye.length() < EPS);
    }

    #[test]
    fn test_mouse_drag_uses_divisor() {
        let mut camera = Camera::with_transform(Vec3::ZERO, Vec3::ZERO);
        assert!(camera.apply_mouse_drag(20.0, -10.0));
        assert!((camera.rotation().x - 2.0).abs() < EPS);
        assert!((camera.rotation().y + 1.0).abs() < EPS);
        assert!(!camera.apply_mouse_drag(0.0, 0.0));
    }
}
