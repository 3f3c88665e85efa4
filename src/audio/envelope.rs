//! Loudness envelope: raw waveform energy to a smoothed intensity scalar.

use crate::params::EnvelopeConfig;

/// Smoothed RMS loudness, updated once per frame
#[derive(Debug, Clone)]
pub struct AudioEnvelopeTracker {
    config: EnvelopeConfig,
    intensity: f32,
}

impl AudioEnvelopeTracker {
    pub fn new(config: EnvelopeConfig) -> Self {
        Self {
            config,
            intensity: 0.0,
        }
    }

    /// Current intensity (≥ 0)
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Drop back to silence
    pub fn reset(&mut self) {
        self.intensity = 0.0;
    }

    /// Update for one reference frame
    pub fn update(&mut self, samples: &[f32]) -> f32 {
        self.update_for(samples, 1.0 / self.config.reference_fps)
    }

    /// Update for `delta_s` of elapsed time
    ///
    /// The smoothing factor is defined per reference frame and rescaled to the
    /// actual frame time, so decay speed does not depend on frame rate. An
    /// empty buffer carries no information and leaves intensity unchanged.
    pub fn update_for(&mut self, samples: &[f32], delta_s: f32) -> f32 {
        if samples.is_empty() || !(delta_s.is_finite() && delta_s > 0.0) {
            return self.intensity;
        }

        let target = rms(samples) * self.config.gain;
        let frames = delta_s * self.config.reference_fps;
        let alpha = 1.0 - (1.0 - self.config.smoothing).powf(frames);

        self.intensity = (self.intensity + (target - self.intensity) * alpha).max(0.0);
        self.intensity
    }
}

/// Root-mean-square of a sample buffer (0 for an empty buffer)
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn tracker() -> AudioEnvelopeTracker {
        AudioEnvelopeTracker::new(EnvelopeConfig::default())
    }

    fn sine(len: usize, amplitude: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amplitude * (2.0 * PI * i as f32 / 64.0).sin())
            .collect()
    }

    #[test]
    fn test_rms() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(rms(&[0.0; 16]), 0.0);
        assert!((rms(&[0.5; 16]) - 0.5).abs() < 1e-6);
        assert!((rms(&[1.0, -1.0, 1.0, -1.0]) - 1.0).abs() < 1e-6);
        // Full-period sine: amplitude / sqrt(2)
        assert!((rms(&sine(1024, 1.0)) - 0.70710677).abs() < 1e-4);
    }

    #[test]
    fn test_first_update_moves_by_smoothing() {
        let mut env = tracker();
        let out = env.update(&[0.2; 256]);
        // target = 0.2 * 5 = 1.0, one step of 0.15
        assert!((out - 0.15).abs() < 1e-5);
    }

    #[test]
    fn test_converges_to_scaled_rms() {
        let mut env = tracker();
        let loud = [0.1f32; 512];
        for _ in 0..200 {
            env.update(&loud);
        }
        assert!((env.intensity() - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_silence_decays_monotonically() {
        let mut env = tracker();
        for _ in 0..200 {
            env.update(&[0.2; 64]);
        }
        assert!((env.intensity() - 1.0).abs() < 1e-3);

        let silence = [0.0f32; 1024];
        let mut prev = env.intensity();
        for _ in 0..30 {
            let next = env.update(&silence);
            assert!(next < prev);
            assert!(next >= 0.0);
            prev = next;
        }
        assert!(env.intensity() < 0.01);
    }

    #[test]
    fn test_empty_buffer_leaves_intensity() {
        let mut env = tracker();
        env.update(&[0.3; 32]);
        let before = env.intensity();
        assert_eq!(env.update(&[]), before);
        assert_eq!(env.update_for(&[0.3; 32], -1.0), before);
    }

    #[test]
    fn test_frame_rate_independent() {
        let mut at_60 = tracker();
        let mut at_30 = tracker();
        let loud = [0.15f32; 256];

        for _ in 0..60 {
            at_60.update_for(&loud, 1.0 / 60.0);
        }
        for _ in 0..30 {
            at_30.update_for(&loud, 1.0 / 30.0);
        }
        assert!((at_60.intensity() - at_30.intensity()).abs() < 1e-4);
    }

    #[test]
    fn test_reset() {
        let mut env = tracker();
        env.update(&[0.9; 8]);
        env.reset();
        assert_eq!(env.intensity(), 0.0);
    }
}
