//! Triangle scan conversion.
//!
//! [`ScanlineRasterizer`] fills projected triangles one horizontal span at a
//! time, interpolating depth along the edges and across each span, and hands
//! every covered pixel to the depth-tested [`FrameBuffer`](super::FrameBuffer).

mod scanline;

pub use scanline::{ScanLineData, ScanlineRasterizer};
