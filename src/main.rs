#![warn(clippy::pedantic)]
use std::{error::Error, path::PathBuf, process::ExitCode};

use clap::Parser;
use winit::{
    event::{Event, WindowEvent},
    keyboard::PhysicalKey,
};

use config::Config;
use error::AppError;
use frame::Renderer;
use input::{FrameClock, InputState};
use scene::Scene;

mod camera;
mod config;
mod error;
mod frame;
mod input;
mod mesh;
mod scene;
mod shader;
mod texture;
mod transform;

#[derive(Parser)]
#[command(name = "flycam", about = "Textured boxes viewed through a free-fly camera")]
struct Cli {
    /// TOML file overriding the window, camera, projection and scene defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image for texture slot 0
    #[arg(short, long)]
    texture: Option<PathBuf>,

    /// Enable debug logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            let mut source = err.source();
            while let Some(cause) = source {
                log::error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, AppError> {
    let mut config = match &cli.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };
    if let Some(texture) = &cli.texture {
        match config.textures.first_mut() {
            Some(slot) => *slot = texture.clone(),
            None => config.textures.push(texture.clone()),
        }
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let config = load_config(cli)?;

    let event_loop = winit::event_loop::EventLoopBuilder::new().build()?;
    let (window, display) = glium::backend::glutin::SimpleWindowBuilder::new()
        .with_title(&config.window.title)
        .with_inner_size(config.window.width, config.window.height)
        .build(&event_loop);
    log::info!("OpenGL version: {}", display.get_opengl_version_string());

    let renderer = Renderer::new(&display, &config)?;
    let mut scene = Scene::new(&config);
    scene.check_textures(renderer.texture_count())?;

    let mut input = InputState::default();
    let mut clock = FrameClock::default();
    let mut failure: Option<AppError> = None;

    // rendering loop
    event_loop.run(|event, window_target| {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => window_target.exit(),

                WindowEvent::RedrawRequested => {
                    let delta_time = clock.tick();
                    scene.update(&input.drain(), delta_time);

                    let mut target = display.draw();
                    // the frame has to be finished even when a draw call failed
                    let drawn = renderer.draw_frame(&mut target, &scene);
                    let finished = target.finish().map_err(AppError::from);
                    if let Err(err) = drawn.and(finished) {
                        failure = Some(err);
                        window_target.exit();
                    }
                }
                // resize the display when the window's size has changed
                WindowEvent::Resized(window_size) => {
                    display.resize(window_size.into());
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if let PhysicalKey::Code(code) = event.physical_key {
                        input.handle_key(code, event.state, event.repeat);
                    }
                    if input.quit_requested() {
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.handle_cursor(position.x, position.y);
                }
                WindowEvent::CursorLeft { .. } => input.handle_cursor_left(),
                WindowEvent::MouseWheel { delta, .. } => input.handle_scroll(delta),
                WindowEvent::Focused(false) => input.release_all(),
                _ => (),
            },
            // ensures continuous rendering
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => (),
        };
    })?;

    failure.map_or(Ok(()), Err)
}
