//! RGBA colors and the packed ARGB8888 layout used by the color buffer.

use serde::Deserialize;

/// A straight (non-premultiplied) 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct Color4 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

pub const BLACK: Color4 = Color4::new(0, 0, 0, 255);
pub const RED: Color4 = Color4::new(255, 0, 0, 255);
pub const BLUE: Color4 = Color4::new(0, 0, 255, 255);

/// Colors cycled across the faces of a mesh, indexed by face parity.
pub const FACE_PALETTE: [Color4; 2] = [RED, BLUE];

impl Color4 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies every channel, alpha included, by `intensity`.
    ///
    /// The float result is narrowed back with Rust's saturating cast: the
    /// fraction is truncated, values above 255 clamp to 255, negatives and
    /// NaN become 0.
    #[inline]
    pub fn scaled(self, intensity: f32) -> Self {
        let scale = |channel: u8| (channel as f32 * intensity) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: scale(self.a),
        }
    }

    /// Packs the color as `0xAARRGGBB`.
    #[inline]
    pub fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpacks a `0xAARRGGBB` value.
    #[inline]
    pub fn from_argb(argb: u32) -> Self {
        Self {
            a: (argb >> 24) as u8,
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }
}

/// Base color of the face at `face_index` within its mesh.
#[inline]
pub fn face_color(face_index: usize) -> Color4 {
    FACE_PALETTE[face_index % FACE_PALETTE.len()]
}
