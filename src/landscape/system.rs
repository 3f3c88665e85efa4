//! Frame pipeline: envelope, scroll and mesh, advanced together once per tick.

use super::mesh::{MeshBuilder, TerrainMesh};
use super::scroll::ScrollState;
use crate::audio::AudioEnvelopeTracker;
use crate::error::ConfigError;
use crate::params::{EnvelopeConfig, LandscapeParams};

/// Per-frame summary for logging and shader uniforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub intensity: f32,
    pub amplitude: f32,
    pub scroll_offset: f32,
    pub peak_height: f32,
}

/// Owns all animation state; the frame driver calls [`LandscapeSystem::tick`] once per frame
pub struct LandscapeSystem {
    pub mesh: TerrainMesh,
    builder: MeshBuilder,
    scroll: ScrollState,
    envelope: AudioEnvelopeTracker,
    params: LandscapeParams,
}

impl LandscapeSystem {
    /// Create new landscape system, rejecting invalid parameters up front
    pub fn new(params: LandscapeParams, envelope: EnvelopeConfig) -> Result<Self, ConfigError> {
        params.validate()?;
        envelope.validate()?;

        let builder = MeshBuilder::new(&params);
        let mesh = builder.new_mesh();
        let scroll = ScrollState::new(&params);

        let mut system = Self {
            mesh,
            builder,
            scroll,
            envelope: AudioEnvelopeTracker::new(envelope),
            params,
        };
        // First frame is valid before any tick
        system.builder.build(&system.scroll, 0.0, &mut system.mesh);
        Ok(system)
    }

    /// Advance one frame
    ///
    /// # Arguments
    /// * `delta_s` - Elapsed time since the previous tick (seconds)
    /// * `waveform` - Latest audio snapshot, `None` while nothing is playing
    pub fn tick(&mut self, delta_s: f32, waveform: Option<&[f32]>) -> FrameStats {
        if let Some(samples) = waveform {
            self.envelope.update_for(samples, delta_s);
        }
        self.scroll.advance(delta_s);

        let intensity = self.envelope.intensity();
        let amplitude = self.builder.build(&self.scroll, intensity, &mut self.mesh);

        let stats = FrameStats {
            intensity,
            amplitude,
            scroll_offset: self.scroll.offset(),
            peak_height: self.mesh.peak_height(),
        };
        log::trace!("{:?}", stats);
        stats
    }

    pub fn params(&self) -> &LandscapeParams {
        &self.params
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn intensity(&self) -> f32 {
        self.envelope.intensity()
    }
}
