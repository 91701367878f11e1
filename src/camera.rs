//! Orbital camera for scene viewing.
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (camera looks down -Z in view space)
//!
//! # Orientation
//!
//! The camera is defined by a position and a target point rather than
//! angles; the view basis is rebuilt from those on every query. Only the
//! horizontal orbit around the target carries accumulated angle state.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

const DEFAULT_FOV_DEGREES: f32 = 60.0;
const DEFAULT_ASPECT_RATIO: f32 = 16.0 / 9.0;
const DEFAULT_NEAR_PLANE: f32 = 0.1;
const DEFAULT_FAR_PLANE: f32 = 100.0;

/// A look-at camera orbiting and strafing around a target point.
///
/// View and projection matrices are derived on demand from the current
/// state; nothing is cached, so there is no invalidation to get wrong.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    fov: f32, // vertical field of view (radians)
    aspect_ratio: f32,
    near_plane: f32,
    far_plane: f32,
    /// Accumulated horizontal orbit angle around the target (radians).
    orbit_angle: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a camera at `position` looking at `target` with the default
    /// lens: 60 degree vertical field of view, 16:9 aspect ratio.
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self::with_settings(
            position,
            target,
            Vec3::UP,
            DEFAULT_FOV_DEGREES,
            DEFAULT_ASPECT_RATIO,
        )
    }

    /// Creates a camera with an explicit up vector and lens settings.
    ///
    /// # Arguments
    ///
    /// * `fov_degrees` - Vertical field of view in degrees; stored as radians.
    /// * `aspect_ratio` - Viewport width / height.
    pub fn with_settings(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov_degrees: f32,
        aspect_ratio: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            fov: fov_degrees.to_radians(),
            aspect_ratio,
            near_plane: DEFAULT_NEAR_PLANE,
            far_plane: DEFAULT_FAR_PLANE,
            orbit_angle: 0.0,
        }
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// Computes the view matrix transforming world coordinates to camera
    /// space. Rebuilt from position/target/up on every call.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Computes the perspective projection matrix for the current lens.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect_ratio, self.near_plane, self.far_plane)
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves the camera along its viewing direction.
    ///
    /// Position and target translate together, so the view direction is
    /// unchanged and the move is exactly reversible with `-distance`.
    pub fn move_forward(&mut self, distance: f32) {
        let forward = (self.target - self.position).normalize();
        self.position = self.position + forward * distance;
        self.target = self.target + forward * distance;
    }

    /// Strafes the camera perpendicular to its viewing direction.
    /// Position and target translate together.
    pub fn move_right(&mut self, distance: f32) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(self.up).normalize();
        self.position = self.position + right * distance;
        self.target = self.target + right * distance;
    }

    /// Orbits the camera around its target on a sphere of the current
    /// radius.
    ///
    /// `angle_y` accumulates into the stored orbit angle across calls;
    /// `angle_x` (elevation) is applied fresh each call. Angles are radians.
    pub fn rotate_around_target(&mut self, angle_x: f32, angle_y: f32) {
        let radius = (self.position - self.target).magnitude();
        self.orbit_angle += angle_y;

        self.position = self.target
            + Vec3::new(
                radius * self.orbit_angle.cos() * angle_x.cos(),
                radius * angle_x.sin(),
                radius * self.orbit_angle.sin() * angle_x.cos(),
            );
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the camera's world position.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the point the camera is looking at.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Returns the camera's up direction.
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Returns the vertical field of view in radians.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn near_plane(&self) -> f32 {
        self.near_plane
    }

    pub fn far_plane(&self) -> f32 {
        self.far_plane
    }

    /// Returns the accumulated horizontal orbit angle in radians.
    pub fn orbit_angle(&self) -> f32 {
        self.orbit_angle
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_camera_looks_at_origin_from_z() {
        let camera = Camera::default();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.target(), Vec3::ZERO);
        assert_relative_eq!(camera.fov(), 60.0f32.to_radians());
        assert_relative_eq!(camera.aspect_ratio(), 16.0 / 9.0);
    }

    #[test]
    fn move_forward_preserves_view_direction() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let direction_before = (camera.target() - camera.position()).normalize();

        camera.move_forward(2.0);

        let direction_after = (camera.target() - camera.position()).normalize();
        assert_relative_eq!(direction_after.x, direction_before.x, epsilon = 1e-6);
        assert_relative_eq!(direction_after.y, direction_before.y, epsilon = 1e-6);
        assert_relative_eq!(direction_after.z, direction_before.z, epsilon = 1e-6);
        assert_relative_eq!(camera.position().z, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn move_forward_then_back_returns_to_start() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 5.0), Vec3::new(0.0, 1.0, 0.0));
        let start = camera.position();

        camera.move_forward(3.0);
        camera.move_forward(-3.0);

        assert_relative_eq!(camera.position().x, start.x, epsilon = 1e-5);
        assert_relative_eq!(camera.position().y, start.y, epsilon = 1e-5);
        assert_relative_eq!(camera.position().z, start.z, epsilon = 1e-5);
    }

    #[test]
    fn move_right_is_perpendicular_to_view() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let forward = (camera.target() - camera.position()).normalize();
        let before = camera.position();

        camera.move_right(2.0);

        let offset = camera.position() - before;
        assert_relative_eq!(offset.dot(forward), 0.0, epsilon = 1e-5);
        assert_relative_eq!(offset.magnitude(), 2.0, epsilon = 1e-5);
    }

    #[test]
    fn orbit_preserves_distance_to_target() {
        let mut camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let radius = (camera.position() - camera.target()).magnitude();

        camera.rotate_around_target(0.3, 1.2);

        let new_radius = (camera.position() - camera.target()).magnitude();
        assert_relative_eq!(new_radius, radius, epsilon = 1e-5);
    }

    #[test]
    fn orbit_angle_accumulates_across_calls() {
        let mut stepped = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        stepped.rotate_around_target(0.0, 0.5);
        stepped.rotate_around_target(0.0, 0.5);

        let mut direct = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        direct.rotate_around_target(0.0, 1.0);

        assert_relative_eq!(stepped.orbit_angle(), direct.orbit_angle());
        assert_relative_eq!(stepped.position().x, direct.position().x, epsilon = 1e-5);
        assert_relative_eq!(stepped.position().y, direct.position().y, epsilon = 1e-5);
        assert_relative_eq!(stepped.position().z, direct.position().z, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_maps_position_to_origin() {
        let camera = Camera::new(Vec3::new(5.0, 3.0, 5.0), Vec3::ZERO);
        let view = camera.view_matrix();

        let eye = view.transform_point(camera.position());
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn projection_matrix_uses_lens_settings() {
        let camera = Camera::with_settings(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::UP,
            90.0,
            2.0,
        );
        let projection = camera.projection_matrix();

        // For a 90 degree fov, 1 / tan(fov / 2) is exactly 1.
        assert_relative_eq!(projection.get(1, 1), 1.0, epsilon = 1e-5);
        assert_relative_eq!(projection.get(0, 0), 0.5, epsilon = 1e-5);
    }
}
