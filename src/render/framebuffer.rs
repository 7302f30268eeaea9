//! Pixel storage and the depth-tested pixel sink.
//!
//! - [`Surface`] is what the host display has to offer: a fixed-size grid of
//!   pixels that can be cleared and written one point at a time.
//! - [`ColorBuffer`] is the in-memory surface, stored as ARGB8888.
//! - [`DepthBuffer`] holds the nearest depth accepted at each pixel this frame.
//! - [`FrameBuffer`] borrows a surface and a depth buffer together and gates
//!   every pixel write on the depth test.

use crate::colors::Color4;
use crate::math::Vec3;

/// A fixed-size pixel grid that colors can be written to.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fill the whole surface with one color.
    fn clear(&mut self, color: Color4);

    /// Write a single pixel. Callers guarantee `x < width` and `y < height`.
    fn draw_point(&mut self, x: u32, y: u32, color: Color4);
}

/// An owned ARGB8888 color buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorBuffer {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl ColorBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color4> {
        if x < self.width && y < self.height {
            Some(Color4::from_argb(
                self.pixels[(y * self.width + x) as usize],
            ))
        } else {
            None
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// The buffer as raw bytes, ready for a streaming texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

impl Surface for ColorBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Color4) {
        self.pixels.fill(color.to_argb());
    }

    #[inline]
    fn draw_point(&mut self, x: u32, y: u32, color: Color4) {
        self.pixels[(y * self.width + x) as usize] = color.to_argb();
    }
}

/// Per-pixel depth, row-major, `width * height` entries.
///
/// Smaller values are nearer. After [`DepthBuffer::reset`] every entry is
/// `f32::MAX`, so the first fragment at any pixel passes.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
    width: u32,
    height: u32,
}

impl DepthBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            depths: vec![f32::MAX; width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Forget every depth written this frame.
    pub fn reset(&mut self) {
        self.depths.fill(f32::MAX);
    }

    /// Depth stored at (x, y), or None if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.depths[(x + y * self.width) as usize])
        } else {
            None
        }
    }

    /// Records `z` at (x, y) unless a strictly nearer depth is already there.
    ///
    /// Equal depths pass, so the last coplanar writer wins.
    /// Returns whether the fragment passed.
    #[inline]
    pub fn test_and_set(&mut self, x: u32, y: u32, z: f32) -> bool {
        let index = (x + y * self.width) as usize;
        if self.depths[index] < z {
            return false;
        }
        self.depths[index] = z;
        true
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depths
    }
}

/// A surface and its depth buffer, borrowed together for one render pass.
///
/// This is a borrowed view, not an owning type - it's meant to be created
/// temporarily when rasterizing so both buffers travel as one argument.
pub struct FrameBuffer<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    depth: &'a mut DepthBuffer,
}

impl<'a, S: Surface + ?Sized> FrameBuffer<'a, S> {
    /// # Panics
    /// Panics in debug builds if the surface and depth buffer sizes differ.
    pub fn new(surface: &'a mut S, depth: &'a mut DepthBuffer) -> Self {
        debug_assert_eq!(
            (surface.width(), surface.height()),
            (depth.width(), depth.height()),
            "Depth buffer size doesn't match surface"
        );
        Self { surface, depth }
    }

    pub fn width(&self) -> u32 {
        self.depth.width()
    }

    pub fn height(&self) -> u32 {
        self.depth.height()
    }

    /// Plots `p` if it lies on the surface; anything else is silently dropped.
    ///
    /// x and y are truncated to whole pixels, z goes through the depth test.
    #[inline]
    pub fn draw_point(&mut self, p: Vec3, color: Color4) {
        if p.x >= 0.0 && p.y >= 0.0 && p.x < self.width() as f32 && p.y < self.height() as f32 {
            self.put_pixel(p.x as u32, p.y as u32, p.z, color);
        }
    }

    /// Writes a pixel at in-bounds (x, y) if it passes the depth test.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, z: f32, color: Color4) {
        if self.depth.test_and_set(x, y, z) {
            self.surface.draw_point(x, y, color);
        }
    }
}
