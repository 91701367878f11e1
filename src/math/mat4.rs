//! 4x4 transformation matrix for the rendering pipeline.
//!
//! # Convention
//! - Storage is row-major: `data[row][col]`
//! - Vectors are **column vectors** on the right: `m.transform_point(v)`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B` applies B first, then A
//!
//! # Example
//! ```ignore
//! let mvp = projection * view * model;   // model applied first
//! let clip = mvp.transform_point(vertex);
//! ```

use std::ops::Mul;

use super::vec3::Vec3;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis (counter-clockwise for a
    /// positive `angle` in radians, looking down the axis).
    pub fn rotation_y(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed symmetric perspective projection.
    ///
    /// Depth is mapped so the near plane lands at -1 and the far plane at +1
    /// after the perspective divide.
    ///
    /// # Arguments
    ///
    /// * `fov` - Vertical field of view in radians.
    /// * `aspect_ratio` - Viewport width / height.
    /// * `near` / `far` - Distances to the clip planes, both positive.
    pub fn perspective(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let tan_half_fov = (fov / 2.0).tan();
        Mat4::new([
            [1.0 / (aspect_ratio * tan_half_fov), 0.0, 0.0, 0.0],
            [0.0, 1.0 / tan_half_fov, 0.0, 0.0],
            [
                0.0,
                0.0,
                -(far + near) / (far - near),
                -(2.0 * far * near) / (far - near),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Creates a view matrix looking from `eye` toward `target`.
    ///
    /// Builds an orthonormal camera basis (forward toward the target, right,
    /// recomputed up) and folds the eye translation in via negative dot
    /// products, so transforming `eye` yields the origin.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The approximate up direction of the camera.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = forward.cross(up).normalize();
        let camera_up = right.cross(forward);

        Mat4::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [camera_up.x, camera_up.y, camera_up.z, -camera_up.dot(eye)],
            [-forward.x, -forward.y, -forward.z, forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transforms a point, applying translation and the perspective divide.
    ///
    /// The point is extended to `(x, y, z, 1)`. When the resulting `w` is
    /// non-zero the components are divided by it; a zero `w` skips the divide
    /// and returns the raw product (degenerate case at the camera plane).
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        let m = &self.data;
        let x = m[0][0] * point.x + m[0][1] * point.y + m[0][2] * point.z + m[0][3];
        let y = m[1][0] * point.x + m[1][1] * point.y + m[1][2] * point.z + m[1][3];
        let z = m[2][0] * point.x + m[2][1] * point.y + m[2][2] * point.z + m[2][3];
        let w = m[3][0] * point.x + m[3][1] * point.y + m[3][2] * point.z + m[3][3];

        if w != 0.0 {
            Vec3::new(x / w, y / w, z / w)
        } else {
            Vec3::new(x, y, z)
        }
    }

    /// Transforms a direction, ignoring translation.
    ///
    /// Only the upper 3x3 block is applied. Normals transformed this way are
    /// not renormalized here, and non-uniform scaling skews them (no
    /// inverse-transpose); callers renormalize after.
    pub fn transform_direction(&self, dir: Vec3) -> Vec3 {
        let m = &self.data;
        Vec3::new(
            m[0][0] * dir.x + m[0][1] * dir.y + m[0][2] * dir.z,
            m[1][0] * dir.x + m[1][1] * dir.y + m[1][2] * dir.z,
            m[2][0] * dir.x + m[2][1] * dir.y + m[2][2] * dir.z,
        )
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B` applies B first, then A, matching column-vector convention.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}
