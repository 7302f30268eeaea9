//! The pixel half of the pipeline: storage, scan conversion and frame driving.

pub mod framebuffer;
pub mod rasterizer;
pub mod renderer;

pub use framebuffer::{ColorBuffer, DepthBuffer, FrameBuffer, Surface};
pub use rasterizer::{ScanLineData, ScanlineRasterizer};
pub use renderer::Renderer;
