//! Audio playback and loudness analysis.
//!
//! Glicol procedural synthesis plays through cpal; the output callback keeps a
//! short waveform history that the frame loop turns into a smoothed intensity.

mod envelope;
mod source;
mod synthesis;
mod system;

// Re-export public types
pub use envelope::{rms, AudioEnvelopeTracker};
pub use source::{WaveformRing, WaveformSource};
pub use system::AudioSystem;
