//! Vaporscape library - Audio-reactive wireframe landscape

pub mod audio;
pub mod camera;
pub mod cli;
pub mod error;
pub mod landscape;
pub mod noise;
pub mod params;
pub mod rendering;
