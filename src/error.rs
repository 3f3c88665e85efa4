//! Error types for configuration, audio and rendering setup.
//!
//! The per-frame pipeline itself never fails; everything here is raised while
//! the application is starting up.

use thiserror::Error;

/// Invalid parameter combination, detected before any system is built.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid needs at least 2 columns and 2 rows, got {columns}x{rows}")]
    DegenerateGrid { columns: usize, rows: usize },

    #[error("cell size must be positive and finite, got {0}")]
    CellSize(f32),

    #[error(
        "zone boundaries must satisfy 0 < road_width < first_range_end < 1, \
         got road_width={road_width} first_range_end={first_range_end}"
    )]
    ZoneOrder {
        road_width: f32,
        first_range_end: f32,
    },

    #[error("seam blend {seam_blend} overlaps a neighbouring zone boundary")]
    SeamBlend { seam_blend: f32 },

    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f32 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },

    #[error("smoothing factor must be in (0, 1], got {0}")]
    Smoothing(f32),

    #[error("waveform length must be non-zero")]
    EmptyWaveform,
}

/// Failure while bringing up the audio output.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("invalid audio configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("no audio output device found")]
    NoOutputDevice,

    #[error("failed to query output config: {0}")]
    OutputConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("synth engine init failed: {0}")]
    Synth(String),

    #[error("failed to open recording: {0}")]
    Recording(#[from] hound::Error),
}

/// Failure while creating the GPU surface or device.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
