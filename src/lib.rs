//! A CPU-based software 3D rasterizer.
//!
//! Meshes go through a model-view-projection transform, get one flat
//! light intensity per face, and are scan-converted into a color buffer
//! behind a per-pixel depth test. SDL2 is used only to show the result
//! (behind the default `window` feature).
//!
//! # Quick Start
//!
//! ```ignore
//! use softrender::prelude::*;
//!
//! let config = RenderConfig::default();
//! let mut engine = Engine::new(&config, vec![Mesh::cube(1.0)]);
//! engine.update();
//! engine.render();
//! let argb_bytes = engine.frame_buffer();
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod scene;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

pub use config::{ConfigError, RenderConfig};
pub use engine::Engine;
pub use mesh::{Mesh, MeshError};
pub use scene::SceneError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::colors::Color4;
    pub use crate::config::RenderConfig;
    pub use crate::engine::Engine;
    pub use crate::light::PointLight;
    pub use crate::math::{Mat4, Vec3, Vec4};
    pub use crate::mesh::{Face, Mesh, Vertex};
    pub use crate::projection::{Projection, Viewport};
    pub use crate::render::{ColorBuffer, DepthBuffer, Renderer, Surface};
    pub use crate::transform::Transform;

    #[cfg(feature = "window")]
    pub use crate::window::{Window, WindowEvent};
}
