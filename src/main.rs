//! `softrender [SCENE.babylon] [CONFIG.json]`
//!
//! Opens a window and spins the meshes of a Babylon scene, or a unit cube
//! when no scene is given. Set `RUST_LOG` to change the log level.

use anyhow::{Context, Result};
use log::info;

use softrender::config::RenderConfig;
use softrender::engine::Engine;
use softrender::mesh::Mesh;
use softrender::scene;
use softrender::window::{Window, WindowEvent};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next();
    let config_path = args.next();

    let config = match &config_path {
        Some(path) => RenderConfig::from_json_file(path)
            .with_context(|| format!("loading config {path}"))?,
        None => RenderConfig::default(),
    };

    let meshes = match &scene_path {
        Some(path) => scene::load_scene(path).with_context(|| format!("loading scene {path}"))?,
        None => {
            info!("No scene given, drawing a unit cube");
            vec![Mesh::cube(1.0)]
        }
    };

    let mut window = Window::new(&config.title, config.width, config.height)
        .map_err(anyhow::Error::msg)
        .context("creating window")?;
    let mut engine = Engine::new(&config, meshes);

    while window.poll_events() != WindowEvent::Quit {
        engine.update();
        engine.render();
        window
            .present(engine.frame_buffer())
            .map_err(anyhow::Error::msg)
            .context("presenting frame")?;
    }

    info!("Quit after {} frames", engine.frame());
    Ok(())
}
