//! Audiogalaxy - An audio-reactive procedural spiral galaxy
//!
//! A particle cloud arranged in spiral arms that shifts color, spins,
//! ripples and shakes with the music.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, KeyCode, ModifiersState, NamedKey, PhysicalKey},
    window::{Window, WindowId},
};

use audiogalaxy::audio::AudioSystem;
use audiogalaxy::camera::OrbitCamera;
use audiogalaxy::cli::Args;
use audiogalaxy::controls::{ControlCommand, ControlEffect, ControlSurface};
use audiogalaxy::frame::FrameDriver;
use audiogalaxy::galaxy::{RandomSource, RngSource};
use audiogalaxy::params::*;
use audiogalaxy::rendering::{RenderSystem, SpriteImage, Uniforms};

/// Edge length of the generated sprite when no texture is given
const SPRITE_SIZE: u32 = 64;

/// Wheel pixels counted as one notch
const PIXELS_PER_LINE: f64 = 50.0;

/// Main application state
struct App {
    args: Args,

    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    driver: FrameDriver,
    controls: ControlSurface,
    camera: OrbitCamera,
    audio: Option<AudioSystem>,
    spectrum: Vec<u8>,

    // Configuration
    render_config: RenderConfig,

    // Input state
    modifiers: ModifiersState,
    dragging: bool,
    cursor: Option<(f64, f64)>,

    // Time tracking
    last_frame: Instant,
}

impl App {
    fn new(args: Args) -> anyhow::Result<Self> {
        let controls = args.control_surface()?;

        let random: Box<dyn RandomSource> = match args.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };

        let mut driver = FrameDriver::new(
            controls.params().clone(),
            ModulationParams::default(),
            random,
        );
        driver
            .regenerate(controls.params().clone())
            .context("Failed to generate initial galaxy")?;

        Ok(Self {
            args,
            window: None,
            render_system: None,
            driver,
            controls,
            camera: OrbitCamera::new(OrbitCameraConfig::default()),
            audio: None,
            spectrum: Vec::new(),
            render_config: RenderConfig::default(),
            modifiers: ModifiersState::empty(),
            dragging: false,
            cursor: None,
            last_frame: Instant::now(),
        })
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Audiogalaxy")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let sprite = match &self.args.texture {
            Some(path) => SpriteImage::load(path)?,
            None => SpriteImage::radial_falloff(SPRITE_SIZE),
        };

        let render_system = pollster::block_on(RenderSystem::new(Arc::clone(&window), &sprite))?;
        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        // Visuals keep running on neutral features without audio
        let analyser_config = AnalyserConfig::default();
        self.spectrum = vec![0; analyser_config.frequency_bin_count()];
        match AudioSystem::new(
            analyser_config,
            self.args.track.as_deref(),
            self.controls.volume(),
            self.controls.is_playing(),
        ) {
            Ok(audio) => self.audio = Some(audio),
            Err(e) => log::warn!("Audio unavailable, running silent: {}", e),
        }

        log::info!("Audiogalaxy is running");
        log::info!("Tab/Shift+Tab select, Up/Down edit, R regenerate, M music, +/- volume, Esc quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.update_title();
        self.last_frame = Instant::now();
        Ok(())
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&format!("Audiogalaxy - {}", self.controls.describe()));
        }
    }

    fn command_for_key(&self, event: &KeyEvent) -> Option<ControlCommand> {
        if let Key::Character(text) = &event.logical_key {
            match text.as_str() {
                "+" | "=" => return Some(ControlCommand::VolumeUp),
                "-" | "_" => return Some(ControlCommand::VolumeDown),
                _ => {}
            }
        }
        if let Key::Named(NamedKey::Tab) = event.logical_key {
            return Some(if self.modifiers.shift_key() {
                ControlCommand::SelectPrevious
            } else {
                ControlCommand::SelectNext
            });
        }

        match event.physical_key {
            PhysicalKey::Code(KeyCode::ArrowUp) => Some(ControlCommand::Increase),
            PhysicalKey::Code(KeyCode::ArrowDown) => Some(ControlCommand::Decrease),
            PhysicalKey::Code(KeyCode::KeyR) => Some(ControlCommand::Regenerate),
            PhysicalKey::Code(KeyCode::KeyM) => Some(ControlCommand::ToggleMusic),
            _ => None,
        }
    }

    fn handle_command(&mut self, command: ControlCommand) {
        let Some(effect) = self.controls.apply(command) else {
            return;
        };

        match effect {
            ControlEffect::Regenerate(params) => {
                if let Err(e) = self.driver.regenerate(params) {
                    log::error!("Regeneration failed, keeping previous galaxy: {}", e);
                }
            }
            ControlEffect::SetPlaying(playing) => {
                if let Some(audio) = &self.audio {
                    audio.set_playing(playing);
                }
                log::info!("Music {}", if playing { "playing" } else { "paused" });
            }
            ControlEffect::SetVolume(volume) => {
                if let Some(audio) = &self.audio {
                    audio.set_volume(volume);
                }
            }
            ControlEffect::Selection(_) => {}
        }
        self.update_title();
    }

    fn handle_cursor(&mut self, x: f64, y: f64) {
        if let (true, Some((last_x, last_y))) = (self.dragging, self.cursor) {
            self.camera.rotate((x - last_x) as f32, (y - last_y) as f32);
        }
        self.cursor = Some((x, y));
    }

    /// Render a single frame
    fn render_frame(&mut self) {
        let now = Instant::now();
        let delta_s = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let spectrum = match self.audio.as_mut() {
            Some(audio) => {
                audio.frequency_data(&mut self.spectrum);
                Some(self.spectrum.as_slice())
            }
            None => None,
        };
        self.driver.tick(delta_s, spectrum);

        self.camera.update();
        let (view_proj, _eye) = self.camera.create_view_proj_matrix(&self.render_config);

        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        let generation = self.driver.state().generation;
        if let Some(particles) = self.driver.particles_mut() {
            render_system.upload_particles(particles, generation);
        }

        let state = self.driver.state();
        let (width, height) = render_system.size();
        let uniforms = Uniforms::new(view_proj, state.rotation, state.params.size, width, height);
        render_system.update_uniforms(&uniforms);

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.recover_surface();
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("Initialization failed: {:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Some(command) = self.command_for_key(&event) {
                    self.handle_command(command);
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.dragging = state == ElementState::Pressed,
            WindowEvent::CursorMoved { position, .. } => self.handle_cursor(position.x, position.y),
            WindowEvent::CursorLeft { .. } => self.cursor = None,
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_LINE) as f32,
                };
                self.camera.zoom(lines);
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.render_config.window_width = size.width;
                    self.render_config.window_height = size.height;
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Audiogalaxy - audio-reactive spiral galaxy");

    let mut app = App::new(args)?;
    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
