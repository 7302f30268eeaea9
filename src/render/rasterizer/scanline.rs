//! Scanline triangle rasterization with inverse-slope edge selection.
//!
//! # Algorithm Overview
//!
//! 1. **Sort vertices** by screen Y with a fixed three-step compare-and-swap,
//!    so `p1` is the topmost and `p3` the bottommost point.
//! 2. **Classify** the triangle by comparing the inverse slopes of the
//!    `p1 -> p2` and `p1 -> p3` edges. This decides which edges bound each
//!    scanline:
//!
//! ```text
//!   dP1P2 > dP1P3            dP1P2 <= dP1P3
//!
//!   P1                              P1
//!   -                                -
//!   --                              --
//!   - -                            - -
//!   -  -                          -  -
//!   -   - P2                  P2 -   -
//!   -  -                          -  -
//!   - -                            - -
//!   -                                -
//!   P3                              P3
//! ```
//!
//! 3. **Walk** every integer Y from `floor(p1.y)` to `floor(p3.y)`. Rows above
//!    `p2.y` use the upper edge pair, the rest use the lower pair.
//! 4. **Fill** each row between the two edge intersections, interpolating
//!    depth linearly in screen space. The span end is exclusive.
//!
//! # Inverse Slope Method
//!
//! ```text
//! inv_slope = dx / dy = (x_end - x_start) / (y_end - y_start)
//! ```
//!
//! A horizontal edge has no inverse slope; it is taken as 0.
//!
//! # References
//!
//! - David Rousset, "Learning how to write a 3D soft engine from scratch"

use crate::colors::Color4;
use crate::light::{PointLight, ShadedFace};
use crate::math::Vec3;
use crate::mesh::Vertex;
use crate::render::framebuffer::{FrameBuffer, Surface};

/// Per-triangle state threaded through the scanline filler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanLineData {
    /// Row being filled.
    pub current_y: i32,
    /// Face lighting intensity, the same for every row of the triangle.
    pub intensity: f32,
}

/// Linear interpolation with the factor clamped to `[0, 1]`.
#[inline]
fn interpolate(min: f32, max: f32, gradient: f32) -> f32 {
    min + gradient.clamp(0.0, 1.0) * (max - min)
}

/// Scanline-based triangle rasterizer with per-face lighting.
///
/// # Characteristics
///
/// - **Flat lit**: one intensity per triangle from the averaged face normal
/// - **Depth tested**: every pixel goes through the frame buffer's z-buffer
/// - **Unclipped**: rows and columns off the surface are skipped, never clipped
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanlineRasterizer {
    light: PointLight,
}

impl ScanlineRasterizer {
    pub fn new(light: PointLight) -> Self {
        Self { light }
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    /// Sorts three vertices by screen Y (ascending: top to bottom).
    ///
    /// Always the same three compare-and-swap steps: (1,2), (2,3), (1,2).
    /// Vertices with equal Y are never swapped, which fixes the case taken
    /// for flat-topped and flat-bottomed triangles.
    pub fn sort_by_y(v1: &mut Vertex, v2: &mut Vertex, v3: &mut Vertex) {
        if v1.coordinates.y > v2.coordinates.y {
            std::mem::swap(v1, v2);
        }
        if v2.coordinates.y > v3.coordinates.y {
            std::mem::swap(v2, v3);
        }
        if v1.coordinates.y > v2.coordinates.y {
            std::mem::swap(v1, v2);
        }
    }

    /// Fills a projected triangle with `color` scaled by its face intensity.
    ///
    /// The vertices must come out of the projection stage: `coordinates` in
    /// screen space, `world_coordinates` and `normal` in camera space.
    pub fn draw_triangle<S: Surface + ?Sized>(
        &self,
        buffer: &mut FrameBuffer<S>,
        mut v1: Vertex,
        mut v2: Vertex,
        mut v3: Vertex,
        color: Color4,
    ) {
        Self::sort_by_y(&mut v1, &mut v2, &mut v3);

        let p1 = v1.coordinates;
        let p2 = v2.coordinates;
        let p3 = v3.coordinates;

        // Zero height: every edge is horizontal and the triangle covers no row.
        if p1.y == p3.y {
            return;
        }

        let face = ShadedFace::new([&v1, &v2, &v3], &self.light);
        let mut data = ScanLineData {
            current_y: 0,
            intensity: face.intensity,
        };

        // Inverse slopes; a horizontal edge counts as 0
        let d_p1_p2 = if p2.y - p1.y > 0.0 {
            (p2.x - p1.x) / (p2.y - p1.y)
        } else {
            0.0
        };
        let d_p1_p3 = if p3.y - p1.y > 0.0 {
            (p3.x - p1.x) / (p3.y - p1.y)
        } else {
            0.0
        };

        // Rows outside the surface would all be dropped by the bounds check.
        let y_start = (p1.y.floor() as i32).max(0);
        let y_end = (p3.y.floor() as i32).min(buffer.height() as i32 - 1);

        for y in y_start..=y_end {
            data.current_y = y;
            let upper_half = (y as f32) < p2.y;

            if d_p1_p2 > d_p1_p3 {
                if upper_half {
                    Self::process_scanline(buffer, data, &v1, &v3, &v1, &v2, color);
                } else {
                    Self::process_scanline(buffer, data, &v1, &v3, &v2, &v3, color);
                }
            } else if upper_half {
                Self::process_scanline(buffer, data, &v1, &v2, &v1, &v3, color);
            } else {
                Self::process_scanline(buffer, data, &v2, &v3, &v1, &v3, color);
            }
        }
    }

    /// Fills one row between edge `va -> vb` and edge `vc -> vd`.
    ///
    /// The row's start X and depth come from `va -> vb`, its end X and depth
    /// from `vc -> vd`, each at `data.current_y`. Pixels run from `sx` up to
    /// but not including `ex`; when `sx >= ex` nothing is drawn.
    pub fn process_scanline<S: Surface + ?Sized>(
        buffer: &mut FrameBuffer<S>,
        data: ScanLineData,
        va: &Vertex,
        vb: &Vertex,
        vc: &Vertex,
        vd: &Vertex,
        color: Color4,
    ) {
        let pa = va.coordinates;
        let pb = vb.coordinates;
        let pc = vc.coordinates;
        let pd = vd.coordinates;

        let y = data.current_y as f32;

        // A horizontal edge gets gradient 1, i.e. its end point.
        let gradient1 = if pa.y != pb.y {
            (y - pa.y) / (pb.y - pa.y)
        } else {
            1.0
        };
        let gradient2 = if pc.y != pd.y {
            (y - pc.y) / (pd.y - pc.y)
        } else {
            1.0
        };

        let sx = interpolate(pa.x, pb.x, gradient1).floor() as i32;
        let ex = interpolate(pc.x, pd.x, gradient2).floor() as i32;

        let z1 = interpolate(pa.z, pb.z, gradient1);
        let z2 = interpolate(pc.z, pd.z, gradient2);

        let shaded = color.scaled(data.intensity);
        let span = (ex as i64 - sx as i64) as f32;

        // Columns outside the surface would all be dropped by the bounds check.
        let x_start = sx.max(0);
        let x_end = ex.min(buffer.width() as i32);

        for x in x_start..x_end {
            let gradient = (x as i64 - sx as i64) as f32 / span;
            let z = interpolate(z1, z2, gradient);
            buffer.draw_point(Vec3::new(x as f32, y, z), shaded);
        }
    }
}
