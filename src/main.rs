//! Vaporscape - A retro wireframe landscape that breathes with the music
//!
//! An endless road runs between two mountain ranges; the ranges swell with
//! the loudness of the soundtrack while the lattice scrolls toward the viewer.

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use vaporscape::audio::{AudioSystem, WaveformSource};
use vaporscape::camera::CameraSystem;
use vaporscape::cli::Args;
use vaporscape::landscape::LandscapeSystem;
use vaporscape::params::*;
use vaporscape::rendering::{RenderSystem, Uniforms};

/// Longest step the frame clock will take after a stall (seconds)
const MAX_FRAME_STEP_S: f32 = 0.25;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    landscape: LandscapeSystem,
    camera: CameraSystem,
    audio: Option<AudioSystem>,

    // Configuration
    render_config: RenderConfig,
    audio_config: AudioConfig,
    recording_config: Option<RecordingConfig>,
    mute: bool,

    // Frame state
    waveform: Vec<f32>,
    last_frame: Instant,
    frame_count: usize,
}

impl App {
    fn new(args: &Args) -> anyhow::Result<Self> {
        let params = args.to_landscape_params();
        let landscape = LandscapeSystem::new(params, EnvelopeConfig::default())
            .context("invalid landscape parameters")?;
        let recording_config = args
            .create_recording_config()
            .context("failed to create recording directories")?;
        let audio_config = AudioConfig::default();

        Ok(Self {
            window: None,
            render_system: None,
            landscape,
            camera: CameraSystem::new(CameraConfig::default()),
            audio: None,
            render_config: RenderConfig::default(),
            waveform: vec![0.0; audio_config.waveform_len],
            audio_config,
            recording_config,
            mute: args.mute,
            last_frame: Instant::now(),
            frame_count: 0,
        })
    }

    fn init(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) -> anyhow::Result<()> {
        // Create window
        let window_attributes = Window::default_attributes()
            .with_title("Vaporscape")
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        // Initialize rendering system
        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.landscape.mesh,
            self.recording_config.clone(),
        ))
        .context("failed to initialize renderer")?;

        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        // Audio is optional: without a device the landscape stays at base amplitude
        if !self.mute {
            match AudioSystem::new(self.audio_config.clone(), self.recording_config.as_ref()) {
                Ok(audio) => self.audio = Some(audio),
                Err(e) => log::warn!("Audio unavailable, running silent: {}", e),
            }
        }

        log::info!("Vaporscape is running, press ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn shutdown(&self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(ref audio) = self.audio {
            audio.finish_recording();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init(event_loop) {
            log::error!("{:#}", e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => self.shutdown(event_loop),
            WindowEvent::Resized(size) => {
                if let Some(ref mut render_system) = self.render_system {
                    render_system.resize(size.width, size.height);
                    let (width, height) = render_system.size();
                    self.render_config.window_width = width;
                    self.render_config.window_height = height;
                }
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();

                if let Some(ref config) = self.recording_config {
                    if self.frame_count >= config.total_frames() {
                        log::info!(
                            "Recording complete: {} frames in {}",
                            self.frame_count,
                            config.output_dir
                        );
                        self.shutdown(event_loop);
                    }
                }
            }
            _ => {}
        }
    }
}

impl App {
    /// Advance the landscape and render a single frame
    fn render_frame(&mut self) {
        let Some(ref mut render_system) = self.render_system else {
            return;
        };

        // Fixed step while recording so output is reproducible
        let now = Instant::now();
        let delta_s = match self.recording_config {
            Some(ref config) => config.frame_step_s(),
            None => now
                .duration_since(self.last_frame)
                .as_secs_f32()
                .min(MAX_FRAME_STEP_S),
        };
        self.last_frame = now;

        let has_audio = self
            .audio
            .as_ref()
            .is_some_and(|audio| audio.read_waveform(&mut self.waveform));
        let waveform = has_audio.then_some(self.waveform.as_slice());

        let stats = self.landscape.tick(delta_s, waveform);

        let view_proj = self
            .camera
            .create_view_proj_matrix(&self.landscape.params().grid, &self.render_config);

        render_system.update_vertices(&self.landscape.mesh.vertices);
        render_system.update_uniforms(&Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
            line_color: self.render_config.line_color,
            height_scale: stats.amplitude,
        });

        match render_system.render(self.frame_count) {
            Ok(()) => self.frame_count += 1,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("Vaporscape - audio-reactive wireframe landscape");

    let mut app = App::new(&args)?;
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
