//! Parameter definitions with units and documented semantics.
//!
//! All tuning constants live here with:
//! - Units (world units, seconds, Hz, noise units)
//! - Documented ranges and meanings
//! - A `validate()` for anything that can be misconfigured

mod audio;
mod camera;
mod landscape;
mod render;

// Re-export all types
pub use audio::{audio_constants, AudioConfig, EnvelopeConfig};
pub use camera::CameraConfig;
pub use landscape::{GridConfig, LandscapeParams, ZoneConfig};
pub use render::{RecordingConfig, RenderConfig};
