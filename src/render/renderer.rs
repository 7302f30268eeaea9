//! Frame-level rendering.
//!
//! [`Renderer`] owns a [`Surface`] and the [`DepthBuffer`] that matches it and
//! runs the whole pipeline for a list of meshes: build matrices, project each
//! face's vertices, then scan-convert the face.

use log::info;

use super::framebuffer::{DepthBuffer, FrameBuffer, Surface};
use super::rasterizer::ScanlineRasterizer;
use crate::camera::Camera;
use crate::colors::{self, Color4};
use crate::light::PointLight;
use crate::math::Mat4;
use crate::mesh::{Mesh, Vertex};
use crate::projection::{Projection, Viewport};
use crate::transform;

pub struct Renderer<S: Surface> {
    surface: S,
    depth_buffer: DepthBuffer,
    rasterizer: ScanlineRasterizer,
    projection: Projection,
}

impl<S: Surface> Renderer<S> {
    /// Creates a renderer drawing into `surface` with the default projection
    /// for its size and the default light.
    pub fn new(surface: S) -> Self {
        let viewport = Viewport::new(surface.width(), surface.height());
        Self::with_settings(surface, Projection::for_viewport(viewport), PointLight::default())
    }

    pub fn with_settings(surface: S, projection: Projection, light: PointLight) -> Self {
        let (width, height) = (surface.width(), surface.height());
        info!(
            "Renderer created: {width}x{height}, fov {:.2} rad, near {}, far {}, light at {:?}",
            projection.fov_y(),
            projection.z_near(),
            projection.z_far(),
            light.position
        );

        Self {
            surface,
            depth_buffer: DepthBuffer::new(width, height),
            rasterizer: ScanlineRasterizer::new(light),
            projection,
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width(), self.height())
    }

    pub fn light(&self) -> &PointLight {
        self.rasterizer.light()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn depth_buffer(&self) -> &DepthBuffer {
        &self.depth_buffer
    }

    /// Starts a frame: fills the surface with `color` and resets every depth.
    ///
    /// The two always go together; a stale depth buffer would hide the new
    /// frame behind the previous one.
    pub fn clear(&mut self, color: Color4) {
        self.surface.clear(color);
        self.depth_buffer.reset();
    }

    /// Projects a source vertex with a mesh's model-view matrix.
    pub fn project(&self, vertex: &Vertex, model_view: &Mat4) -> Vertex {
        transform::project(vertex, model_view, &self.projection.matrix(), self.viewport())
    }

    /// Scan-converts one projected triangle into the surface.
    pub fn draw_triangle(&mut self, v1: Vertex, v2: Vertex, v3: Vertex, color: Color4) {
        let mut buffer = FrameBuffer::new(&mut self.surface, &mut self.depth_buffer);
        self.rasterizer.draw_triangle(&mut buffer, v1, v2, v3, color);
    }

    /// Draws every face of every mesh as seen from `camera`.
    ///
    /// Faces are colored from [`colors::FACE_PALETTE`] by their index within
    /// the mesh. Call [`Renderer::clear`] first; this only adds to the frame.
    pub fn render(&mut self, camera: &Camera, meshes: &[Mesh]) {
        let view = camera.view_matrix();
        let projection = self.projection.matrix();
        let viewport = self.viewport();

        let mut buffer = FrameBuffer::new(&mut self.surface, &mut self.depth_buffer);

        for mesh in meshes {
            let model_view = transform::model_view(&view, mesh.transform());

            for (face_index, face) in mesh.faces().iter().enumerate() {
                let [a, b, c] = mesh
                    .face_vertices(face)
                    .map(|v| transform::project(v, &model_view, &projection, viewport));

                self.rasterizer
                    .draw_triangle(&mut buffer, a, b, c, colors::face_color(face_index));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::mesh::Face;
    use crate::render::framebuffer::ColorBuffer;

    fn renderer() -> Renderer<ColorBuffer> {
        Renderer::new(ColorBuffer::new(640, 480))
    }

    fn written(renderer: &Renderer<ColorBuffer>) -> usize {
        renderer
            .depth_buffer()
            .as_slice()
            .iter()
            .filter(|&&d| d != f32::MAX)
            .count()
    }

    #[test]
    fn clear_resets_surface_and_depth() {
        let mut r = renderer();
        r.clear(colors::BLACK);
        r.render(&Camera::default(), &[Mesh::cube(1.0)]);
        assert!(written(&r) > 0);

        r.clear(colors::BLUE);
        assert_eq!(written(&r), 0);
        assert!(r.surface().pixels().iter().all(|&p| p == colors::BLUE.to_argb()));
    }

    #[test]
    fn cube_fills_the_middle_of_the_frame() {
        let mut r = renderer();
        r.clear(colors::BLACK);
        r.render(&Camera::default(), &[Mesh::cube(1.0)]);

        // A unit cube ten units away spans roughly 61 pixels around the center.
        let depth = r.depth_buffer();
        let mut min = (u32::MAX, u32::MAX);
        let mut max = (0, 0);
        for y in 0..480 {
            for x in 0..640 {
                if depth.get(x, y) != Some(f32::MAX) {
                    min = (min.0.min(x), min.1.min(y));
                    max = (max.0.max(x), max.1.max(y));
                }
            }
        }
        assert!(min.0 >= 285 && max.0 <= 355, "x range {min:?}..{max:?}");
        assert!(min.1 >= 205 && max.1 <= 275, "y range {min:?}..{max:?}");
        assert!(depth.get(330, 240) != Some(f32::MAX));
        assert!(depth.get(310, 240) != Some(f32::MAX));
    }

    #[test]
    fn front_face_covers_its_projected_square() {
        let mut r = renderer();
        let camera = Camera::default();
        r.clear(colors::BLACK);
        r.render(&camera, &[Mesh::cube(1.0)]);

        let model_view = transform::model_view(&camera.view_matrix(), &Default::default());
        let front = |x: f32, y: f32| {
            r.project(&Vertex::new(Vec3::new(x, y, 0.5), Vec3::ZERO), &model_view)
                .coordinates
        };
        // The front side is parallel to the screen, so its depth is constant.
        let front_depth = front(0.0, 0.0).z;
        let (low, high) = (front(-0.5, -0.5), front(0.5, 0.5));
        let (x0, x1) = (low.x.min(high.x).ceil() as u32, low.x.max(high.x).floor() as u32);
        let (y0, y1) = (low.y.min(high.y).ceil() as u32, low.y.max(high.y).floor() as u32);

        // Pixels on the diagonal shared by the two triangles may go to either
        // one, or to neither when the edge lands exactly on a pixel.
        let (seam_start, seam_end) = (front(0.5, -0.5), front(-0.5, 0.5));
        let seam_slope = (seam_end.x - seam_start.x) / (seam_end.y - seam_start.y);

        let mut checked = 0;
        for y in y0..y1 {
            let seam_x = seam_start.x + (y as f32 - seam_start.y) * seam_slope;
            for x in x0..x1 {
                if (x as f32 - seam_x).abs() <= 1.0 {
                    continue;
                }
                let depth = r.depth_buffer().get(x, y).unwrap();
                assert!(
                    (depth - front_depth).abs() < 1e-5,
                    "pixel ({x}, {y}) has depth {depth}, front side is at {front_depth}"
                );
                checked += 1;
            }
        }
        assert!(checked > 3000, "only {checked} pixels checked");
    }

    #[test]
    fn top_of_cube_is_lit_more_than_bottom() {
        let r = renderer();
        let cube = Mesh::cube(1.0);
        let model_view = transform::model_view(&Camera::default().view_matrix(), cube.transform());

        let side_intensity = |normal: Vec3| {
            let face = cube
                .faces()
                .iter()
                .find(|f| cube.face_vertices(f)[0].normal == normal)
                .unwrap();
            let [a, b, c] = cube.face_vertices(face).map(|v| r.project(v, &model_view));
            crate::light::ShadedFace::new([&a, &b, &c], r.light()).intensity
        };

        let top = side_intensity(Vec3::UP);
        let bottom = side_intensity(Vec3::new(0.0, -1.0, 0.0));
        assert!(top > bottom, "top {top}, bottom {bottom}");
        assert_eq!(bottom, 0.0);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let meshes = [Mesh::cube(1.0)];
        let camera = Camera::default();

        let mut r = renderer();
        r.clear(colors::BLACK);
        r.render(&camera, &meshes);
        let first = r.surface().clone();
        let first_depth = r.depth_buffer().clone();

        r.clear(colors::BLACK);
        r.render(&camera, &meshes);
        assert_eq!(r.surface(), &first);
        assert_eq!(r.depth_buffer(), &first_depth);
    }

    #[test]
    fn mesh_outside_the_view_is_not_drawn() {
        let mut r = renderer();
        let mut cube = Mesh::cube(1.0);
        cube.transform_mut().set_position_xyz(50.0, 0.0, 0.0);
        r.clear(colors::BLACK);
        r.render(&Camera::default(), &[cube]);
        assert_eq!(written(&r), 0);
    }

    #[test]
    fn draw_triangle_goes_through_the_depth_test() {
        let mut r = Renderer::with_settings(
            ColorBuffer::new(64, 48),
            Projection::for_viewport(Viewport::new(64, 48)),
            PointLight::new(Vec3::new(0.0, 0.0, -100.0)),
        );
        let projected = |x: f32, y: f32, z: f32| Vertex {
            coordinates: Vec3::new(x, y, z),
            world_coordinates: Vec3::ZERO,
            normal: Vec3::new(0.0, 0.0, -1.0),
        };

        r.clear(colors::BLACK);
        r.draw_triangle(projected(2.0, 2.0, 0.2), projected(40.0, 20.0, 0.2), projected(2.0, 40.0, 0.2), colors::RED);
        r.draw_triangle(projected(2.0, 2.0, 0.7), projected(40.0, 20.0, 0.7), projected(2.0, 40.0, 0.7), colors::BLUE);

        assert_eq!(r.surface().get_pixel(10, 20), Some(colors::RED));
        assert_eq!(r.depth_buffer().get(10, 20), Some(0.2));
    }

    #[test]
    fn faces_alternate_palette_colors() {
        // One square split into two triangles, facing the default camera.
        let normal = Vec3::new(0.0, 0.0, 1.0);
        let square = Mesh::new(
            "square",
            vec![
                Vertex::new(Vec3::new(-0.5, -0.5, 0.5), normal),
                Vertex::new(Vec3::new(0.5, -0.5, 0.5), normal),
                Vertex::new(Vec3::new(0.5, 0.5, 0.5), normal),
                Vertex::new(Vec3::new(-0.5, 0.5, 0.5), normal),
            ],
            vec![Face::new(0, 1, 3), Face::new(1, 2, 3)],
            Vec3::ZERO,
        )
        .unwrap();

        let mut r = renderer();
        r.clear(colors::BLACK);
        r.render(&Camera::default(), &[square]);

        // Face 0 is the triangle on the upper right of the screen, face 1 the lower left.
        let first = r.surface().get_pixel(340, 220).unwrap();
        let second = r.surface().get_pixel(300, 260).unwrap();
        assert!(first.r > 0 && first.g == 0 && first.b == 0, "face 0 drew {first:?}");
        assert!(second.b > 0 && second.r == 0 && second.g == 0, "face 1 drew {second:?}");
    }
}
