//! Look-at camera.
//!
//! # Coordinate System
//!
//! The view matrix is **left-handed**: after the view transform the camera
//! sits at the origin looking down +Z with +Y up. The world up vector is fixed
//! to `(0, 1, 0)`.

use serde::Deserialize;

use crate::math::{Mat4, Vec3};

/// A camera defined by where it is and the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO)
    }
}

impl Camera {
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Builds the world-to-camera matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.position, self.target, Vec3::UP)
    }
}
