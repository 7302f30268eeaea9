//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```ignore
//! let model = translation * rotation;  // rotate about the origin, then place
//! let clip = projection * view * model * Vec4::point(x, y, z);
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
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

    /// Creates a rotation matrix around the X axis.
    ///
    /// Positive angles turn +Y toward +Z.
    pub fn rotation_x(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a rotation matrix around the Y axis.
    ///
    /// Positive angles turn +Z toward +X.
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

    /// Creates a rotation matrix around the Z axis.
    ///
    /// Positive angles turn +X toward +Y.
    pub fn rotation_z(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Mat4::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a left-handed perspective matrix from a vertical field of view.
    ///
    /// Clip-space depth spans `[-1, 1]` between the near and far planes and
    /// `w` receives the view-space z, so depth grows monotonically with
    /// distance for every point in front of the camera.
    ///
    /// # Arguments
    ///
    /// * `fov_y` - Vertical field of view in radians.
    /// * `width`, `height` - Viewport size; only their ratio matters.
    /// * `near`, `far` - Clipping plane distances.
    pub fn perspective_fov_lh(fov_y: f32, width: f32, height: f32, near: f32, far: f32) -> Self {
        let h = (0.5 * fov_y).cos() / (0.5 * fov_y).sin();
        let w = h * height / width;
        let depth = far - near;
        Mat4::new([
            [w, 0.0, 0.0, 0.0],
            [0.0, h, 0.0, 0.0],
            [0.0, 0.0, (far + near) / depth, -(2.0 * far * near) / depth],
            [0.0, 0.0, 1.0, 0.0],
        ])
    }

    /// Creates a view matrix with left-handed coordinate system.
    ///
    /// # Arguments
    ///
    /// * `eye` - The position of the camera.
    /// * `target` - The point the camera is looking at.
    /// * `up` - The up direction of the camera.
    ///
    /// # Returns
    ///
    /// A view matrix.
    pub fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let right = up.cross(forward).normalize();
        let up = forward.cross(right);

        // Basis vectors as rows, combined with translation to eye position
        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [forward.x, forward.y, forward.z, -forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x
                + self.data[r][1] * v.y
                + self.data[r][2] * v.z
                + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}
