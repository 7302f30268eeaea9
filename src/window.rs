//! SDL2 presentation of a finished frame.
//!
//! The window has a fixed size matching the color buffer. Frames are uploaded
//! into a streaming ARGB8888 texture and presented with vsync.

use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    // Declared before `_texture_creator` so it is dropped first.
    texture: Texture<'static>,
    _texture_creator: Box<TextureCreator<WindowContext>>,
    event_pump: sdl2::EventPump,
    width: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is heap-allocated and lives as long as Window.
        // The texture field is dropped before it by declaration order.
        let texture_creator_ref: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(|e| e.to_string())?;

        info!("Window '{title}' opened at {width}x{height}");

        Ok(Self {
            canvas,
            texture,
            _texture_creator: texture_creator,
            event_pump,
            width,
        })
    }

    /// Drains pending events; closing the window or pressing Escape quits.
    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                _ => {}
            }
        }
        WindowEvent::None
    }

    /// Uploads an ARGB8888 frame of exactly `width * height * 4` bytes and shows it.
    pub fn present(&mut self, buffer: &[u8]) -> Result<(), String> {
        self.texture
            .update(None, buffer, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&self.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
