//! Audio playback and loudness-envelope configuration.

use super::landscape::{non_negative, positive};
use crate::error::ConfigError;

/// Playback and analysis configuration
#[derive(Debug, Clone)]
pub struct AudioConfig {
    /// Samples kept for per-frame loudness analysis (mono, most recent)
    pub waveform_len: usize,

    /// Output hard-clip level, protects ears and speakers
    pub clip_level: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            waveform_len: 1024,
            clip_level: 0.5,
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waveform_len == 0 {
            return Err(ConfigError::EmptyWaveform);
        }
        positive("clip_level", self.clip_level)
    }
}

/// Loudness envelope: RMS of each waveform snapshot, scaled and exponentially smoothed
#[derive(Debug, Clone)]
pub struct EnvelopeConfig {
    /// RMS → target intensity scale
    pub gain: f32,

    /// Fraction of the way toward the target covered per reference frame
    pub smoothing: f32,

    /// Frame rate `smoothing` is tuned for; other frame rates are rescaled to match
    pub reference_fps: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            gain: 5.0,
            smoothing: 0.15,
            reference_fps: 60.0,
        }
    }
}

impl EnvelopeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("gain", self.gain)?;
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ConfigError::Smoothing(self.smoothing));
        }
        positive("reference_fps", self.reference_fps)
    }
}

/// Audio constants (compile-time, match Glicol engine setup)
pub mod audio_constants {
    /// Audio block size (samples per buffer), 2.9ms @ 44.1kHz
    pub const BLOCK_SIZE: usize = 128;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_validation() {
        assert!(EnvelopeConfig::default().validate().is_ok());

        let config = EnvelopeConfig {
            smoothing: 0.0,
            ..EnvelopeConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Smoothing(0.0)));

        let config = EnvelopeConfig {
            gain: -1.0,
            ..EnvelopeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_audio_config_validation() {
        assert!(AudioConfig::default().validate().is_ok());

        let config = AudioConfig {
            waveform_len: 0,
            ..AudioConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptyWaveform));
    }
}
