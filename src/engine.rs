//! Frame driver.
//!
//! The [`Engine`] owns the scene (camera and meshes) and a [`Renderer`] over an
//! in-memory [`ColorBuffer`]. The host calls [`Engine::update`] then
//! [`Engine::render`] once per frame and hands [`Engine::frame_buffer`] to the
//! display.

use log::{debug, info};

use crate::camera::Camera;
use crate::colors::Color4;
use crate::config::RenderConfig;
use crate::math::Vec3;
use crate::mesh::Mesh;
use crate::render::{ColorBuffer, Renderer};

pub struct Engine {
    renderer: Renderer<ColorBuffer>,
    camera: Camera,
    meshes: Vec<Mesh>,
    spin: Vec3,
    clear_color: Color4,
    frame: u64,
}

impl Engine {
    pub fn new(config: &RenderConfig, meshes: Vec<Mesh>) -> Self {
        let renderer = Renderer::with_settings(
            ColorBuffer::new(config.width, config.height),
            config.projection(),
            config.light(),
        );

        info!(
            "Engine ready: {} mesh(es), {} faces total",
            meshes.len(),
            meshes.iter().map(|m| m.faces().len()).sum::<usize>()
        );

        Self {
            renderer,
            camera: config.camera,
            meshes,
            spin: config.spin,
            clear_color: config.clear_color,
            frame: 0,
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn renderer(&self) -> &Renderer<ColorBuffer> {
        &self.renderer
    }

    /// Number of frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances the animation by one frame.
    pub fn update(&mut self) {
        for mesh in &mut self.meshes {
            mesh.transform_mut().rotate(self.spin);
        }
    }

    /// Draws the current state into the color buffer.
    pub fn render(&mut self) {
        self.renderer.clear(self.clear_color);
        self.renderer.render(&self.camera, &self.meshes);
        self.frame += 1;

        if self.frame % 600 == 0 {
            debug!("Rendered {} frames", self.frame);
        }
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.surface().as_bytes()
    }
}
