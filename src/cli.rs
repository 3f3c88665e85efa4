//! Command-line argument parsing.

use clap::Parser;

use crate::params::{LandscapeParams, RecordingConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Vaporscape")]
#[command(about = "Audio-reactive wireframe landscape", long_about = None)]
pub struct Args {
    /// Record frames and audio (duration in seconds)
    #[arg(long, value_name = "SECONDS")]
    pub record: Option<f32>,

    /// Perlin noise seed
    #[arg(long, default_value_t = 42)]
    pub seed: u32,

    /// Lattice vertices across the road
    #[arg(long, default_value_t = 48)]
    pub columns: usize,

    /// Lattice vertices along the road
    #[arg(long, default_value_t = 54)]
    pub rows: usize,

    /// Spacing between lattice vertices (world units)
    #[arg(long, value_name = "UNITS", default_value_t = 40.0)]
    pub cell_size: f32,

    /// How strongly audio intensity raises the mountains
    #[arg(long, default_value_t = 2.5)]
    pub sensitivity: f32,

    /// Seconds to scroll forward by one cell (noise drift follows to stay in step)
    #[arg(long, value_name = "SECONDS")]
    pub scroll_period: Option<f32>,

    /// Run without audio output
    #[arg(long)]
    pub mute: bool,
}

impl Args {
    /// Build landscape parameters from the defaults and the command-line overrides
    pub fn to_landscape_params(&self) -> LandscapeParams {
        let mut params = LandscapeParams::default();
        params.noise_seed = self.seed;
        params.grid.columns = self.columns;
        params.grid.rows = self.rows;
        params.grid.cell_size = self.cell_size;
        params.audio_sensitivity = self.sensitivity;

        if let Some(period) = self.scroll_period {
            params.scroll_period_s = period;
            params.noise_drift_per_s = params.noise_scale / period;
        }
        params
    }

    /// Create recording configuration if recording mode is enabled
    pub fn create_recording_config(&self) -> std::io::Result<Option<RecordingConfig>> {
        let Some(duration) = self.record else {
            return Ok(None);
        };
        let config = RecordingConfig::new(duration);

        // Create output directories
        std::fs::create_dir_all(config.frames_dir())?;
        std::fs::create_dir_all(&config.output_dir)?;

        Ok(Some(config))
    }
}
