//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for the perspective
//! parameters (FOV, aspect ratio, near/far planes) and generates the projection
//! matrix. [`Viewport`] is the pixel size that NDC coordinates map onto.

use crate::math::Mat4;

/// Vertical field of view used by default, in radians.
pub const DEFAULT_FOV_Y: f32 = 0.78;
pub const DEFAULT_Z_NEAR: f32 = 0.01;
pub const DEFAULT_Z_FAR: f32 = 1.0;

/// Size in pixels of the surface being drawn to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    /// Near clipping plane distance.
    z_near: f32,
    /// Far clipping plane distance.
    z_far: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// The default projection for a viewport: FOV 0.78 rad, near 0.01, far 1.0.
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self::new(
            DEFAULT_FOV_Y,
            viewport.aspect_ratio(),
            DEFAULT_Z_NEAR,
            DEFAULT_Z_FAR,
        )
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Returns the horizontal field of view in radians.
    ///
    /// Computed from the vertical FOV and aspect ratio.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Generates the left-handed perspective projection matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_fov_lh(self.fov_y, self.aspect_ratio, 1.0, self.z_near, self.z_far)
    }
}
