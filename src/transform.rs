//! Object placement and the vertex projection stage.
//!
//! [`Transform`] holds a mesh's position and Euler rotation with a fluent API.
//! [`project`] takes one vertex through the model-view and projection matrices
//! to screen space, keeping the camera-space position and normal for lighting.

use crate::math::{Mat4, Vec3, Vec4};
use crate::mesh::Vertex;
use crate::projection::Viewport;

/// A 3D placement with position and rotation (Euler angles in radians).
///
/// Provides a fluent API where mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position_xyz(5.0, 2.0, 0.0)
///     .rotate_y(0.1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
}

impl Transform {
    /// Create a transform at the origin with no rotation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transform at `position` with no rotation.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
        }
    }

    // ============ Position ============

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position_xyz(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    // ============ Rotation ============

    /// Get the rotation (Euler angles in radians).
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Add a delta rotation (Euler angles in radians).
    pub fn rotate(&mut self, delta: Vec3) -> &mut Self {
        self.rotation = self.rotation + delta;
        self
    }

    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.rotation.x += angle;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.rotation.z += angle;
        self
    }

    // ============ Matrix Generation ============

    /// Generate the model matrix.
    ///
    /// Order: Translation * RotationX * RotationY * RotationZ. The rotations
    /// are composed onto the translation in X, Y, Z order, so the object spins
    /// about its own origin before being placed at `position`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation(self.position.x, self.position.y, self.position.z)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_z(self.rotation.z)
    }
}

/// Combines a camera view matrix with a model transform: `view * model`.
pub fn model_view(view: &Mat4, transform: &Transform) -> Mat4 {
    *view * transform.to_matrix()
}

/// Projects a vertex to screen space.
///
/// The returned vertex carries:
/// - `coordinates`: screen position. x and y are the NDC values mapped to
///   `[0, width)` and `[0, height)` (no vertical flip), z is NDC depth remapped
///   to `[0, 1]` between the near and far planes.
/// - `world_coordinates`: the position in camera space (model-view only).
/// - `normal`: the vertex normal multiplied by the same model-view matrix as
///   the position, with w = 1.
///
/// Nothing is clipped. Points behind the camera or outside the frustum still
/// produce coordinates; the rasterizer drops whatever lands off-screen.
pub fn project(vertex: &Vertex, model_view: &Mat4, projection: &Mat4, viewport: Viewport) -> Vertex {
    let camera_space = *model_view * Vec4::from(vertex.coordinates);
    let ndc = (*projection * camera_space).perspective_divide() * 0.5;

    let screen = Vec3::new(
        (ndc.x + 0.5) * viewport.width as f32,
        (ndc.y + 0.5) * viewport.height as f32,
        ndc.z + 0.5,
    );

    // Normals share the position matrix, including its translation.
    // Not the inverse-transpose: no scale is ever applied to meshes.
    let normal = *model_view * Vec4::from_vec3(vertex.normal, 1.0);

    Vertex {
        coordinates: screen,
        world_coordinates: camera_space.to_vec3(),
        normal: normal.to_vec3(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::projection::Projection;
    use approx::assert_relative_eq;

    fn setup() -> (Mat4, Mat4, Viewport) {
        let viewport = Viewport::new(640, 480);
        let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let projection = Projection::for_viewport(viewport).matrix();
        (camera.view_matrix(), projection, viewport)
    }

    #[test]
    fn test_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position_xyz(1.0, 2.0, 3.0).rotate_y(0.5).rotate(Vec3::splat(0.25));

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().x, 0.25);
        assert_relative_eq!(t.rotation().y, 0.75);
    }

    #[test]
    fn test_rotation_is_about_own_origin() {
        let mut t = Transform::at(Vec3::new(3.0, 0.0, 0.0));
        t.rotate_z(std::f32::consts::FRAC_PI_2);
        let p = (t.to_matrix() * Vec4::point(1.0, 0.0, 0.0)).to_vec3();
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotations_apply_z_then_y_then_x() {
        let mut t = Transform::new();
        t.rotate_x(std::f32::consts::FRAC_PI_2)
            .rotate_z(std::f32::consts::FRAC_PI_2);
        // Z takes +X to +Y, then X takes +Y to +Z. The reverse order would leave +Y.
        let p = (t.to_matrix() * Vec4::point(1.0, 0.0, 0.0)).to_vec3();
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_origin_projects_to_viewport_center() {
        let (view, projection, viewport) = setup();
        let mv = model_view(&view, &Transform::default());
        let v = project(&Vertex::new(Vec3::ZERO, Vec3::UP), &mv, &projection, viewport);

        assert_relative_eq!(v.coordinates.x, 320.0, epsilon = 1e-3);
        assert_relative_eq!(v.coordinates.y, 240.0, epsilon = 1e-3);
        assert_relative_eq!(v.world_coordinates.z, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_visible_points_land_inside_viewport() {
        let (view, projection, viewport) = setup();
        let mv = model_view(&view, &Transform::default());
        for corner in [
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(2.5, -1.5, 0.0),
        ] {
            let v = project(&Vertex::new(corner, Vec3::UP), &mv, &projection, viewport);
            assert!((0.0..640.0).contains(&v.coordinates.x));
            assert!((0.0..480.0).contains(&v.coordinates.y));
        }
    }

    #[test]
    fn test_nearer_points_get_smaller_depth() {
        let (view, projection, viewport) = setup();
        let mv = model_view(&view, &Transform::default());
        let front = project(&Vertex::new(Vec3::new(0.0, 0.0, 0.5), Vec3::UP), &mv, &projection, viewport);
        let back = project(&Vertex::new(Vec3::new(0.0, 0.0, -0.5), Vec3::UP), &mv, &projection, viewport);
        assert!(front.coordinates.z < back.coordinates.z);
    }

    #[test]
    fn test_normal_uses_position_matrix() {
        let (view, projection, viewport) = setup();
        let mv = model_view(&view, &Transform::default());
        let v = project(&Vertex::new(Vec3::ZERO, Vec3::UP), &mv, &projection, viewport);
        // The camera sits at z = 10, so the translation leaks into the normal.
        assert_relative_eq!(v.normal.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.normal.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.normal.z, 10.0, epsilon = 1e-6);
    }

    #[test]
    fn test_source_vertex_is_untouched() {
        let (view, projection, viewport) = setup();
        let mv = model_view(&view, &Transform::default());
        let source = Vertex::new(Vec3::new(0.5, 0.5, 0.5), Vec3::UP);
        let _ = project(&source, &mv, &projection, viewport);
        assert_eq!(source.world_coordinates, Vec3::ZERO);
        assert_eq!(source.coordinates, Vec3::new(0.5, 0.5, 0.5));
    }
}
