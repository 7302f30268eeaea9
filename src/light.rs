//! Per-face lighting.

use crate::math::Vec3;
use crate::mesh::Vertex;

/// Where the scene light sits unless configured otherwise.
pub const DEFAULT_LIGHT_POSITION: Vec3 = Vec3::new(0.0, 10.0, 10.0);

/// A point light. Its position is compared against camera-space geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_POSITION)
    }
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }

    /// Lighting intensity of a surface point with the given normal.
    pub fn intensity_at(&self, point: Vec3, normal: Vec3) -> f32 {
        compute_face_intensity(point, normal, self.position)
    }
}

/// Cosine of the angle between a surface normal and the direction to the light.
///
/// Both vectors are normalized here, so `normal` may have any length. Surfaces
/// facing away from the light, or perpendicular to it, get 0.
///
/// Returns a value in `[0, 1]`.
pub fn compute_face_intensity(centroid: Vec3, normal: Vec3, light_position: Vec3) -> f32 {
    let light_direction = (light_position - centroid).normalize();
    normal.normalize().dot(light_direction).max(0.0)
}

/// Lighting inputs and result for one projected triangle.
///
/// Computed once per triangle and handed to the scanline filler; nothing is
/// cached on the vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadedFace {
    /// Mean of the three camera-space positions.
    pub centroid: Vec3,
    /// Mean of the three camera-space normals, not renormalized.
    pub normal: Vec3,
    pub intensity: f32,
}

impl ShadedFace {
    pub fn new(vertices: [&Vertex; 3], light: &PointLight) -> Self {
        let [v1, v2, v3] = vertices;
        let normal = (v1.normal + v2.normal + v3.normal) / 3.0;
        let centroid = (v1.world_coordinates + v2.world_coordinates + v3.world_coordinates) / 3.0;

        Self {
            centroid,
            normal,
            intensity: light.intensity_at(centroid, normal),
        }
    }
}
