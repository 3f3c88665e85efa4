//! Terrain height field: layered noise shaped into a road and two mountain ranges.

use crate::noise::NoiseField;
use crate::params::{LandscapeParams, ZoneConfig};

/// Octave layout: (lateral frequency, longitudinal frequency, amplitude weight).
/// Each octave's [0, 1] sample is remapped to ±weight * amplitude.
const OCTAVES: [(f64, f64, f32); 3] = [(1.0, 1.0, 1.0), (2.0, 2.0, 0.3), (4.0, 4.0, 0.15)];

/// Lateral band of the landscape, by distance from the center line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Road,
    FirstRange,
    SecondRange,
}

/// Height of the landscape for any (lateral position, longitudinal noise coordinate)
#[derive(Clone)]
pub struct TerrainHeightModel {
    noise: NoiseField,
    half_columns: f32,
    noise_scale: f64,
    zones: ZoneConfig,
}

impl TerrainHeightModel {
    pub fn new(params: &LandscapeParams) -> Self {
        Self {
            noise: NoiseField::new(params.noise_seed),
            // Narrower lattices are all road
            half_columns: (params.grid.columns as f32 / 2.0).max(0.5),
            noise_scale: params.noise_scale as f64,
            zones: params.zones.clone(),
        }
    }

    /// Terrain height at a lattice column (fractional columns allowed)
    ///
    /// # Arguments
    /// * `lateral_index` - Column position, 0 at the left edge
    /// * `longitudinal` - Longitudinal noise coordinate (noise units)
    /// * `amplitude` - Height scale; negative values are treated as 0
    ///
    /// # Returns
    /// * Height above the reference plane, never negative
    pub fn height_at(&self, lateral_index: f32, longitudinal: f64, amplitude: f32) -> f32 {
        let amplitude = amplitude.max(0.0);
        let d = self.lateral_distance(lateral_index);
        let x = lateral_index as f64 * self.noise_scale;
        let base = self.base_height(x, longitudinal, amplitude);
        self.shape(d, base, amplitude)
    }

    /// Normalized distance from the center line: 0 on it, 1 at either edge
    pub fn lateral_distance(&self, lateral_index: f32) -> f32 {
        ((lateral_index - self.half_columns).abs() / self.half_columns).clamp(0.0, 1.0)
    }

    /// Sum of the noise octaves at a noise-space point, in ±1.45 * amplitude
    pub fn base_height(&self, x: f64, y: f64, amplitude: f32) -> f32 {
        OCTAVES
            .iter()
            .map(|&(fx, fy, weight)| {
                let n = self.noise.sample(x * fx, y * fy);
                (n * 2.0 - 1.0) * weight * amplitude
            })
            .sum()
    }

    pub fn zone(&self, d: f32) -> Zone {
        if d < self.zones.road_width {
            Zone::Road
        } else if d < self.zones.first_range_end {
            Zone::FirstRange
        } else {
            Zone::SecondRange
        }
    }

    /// Apply zone shaping to a base height at lateral distance `d`
    ///
    /// Inside `seam_blend` of a zone boundary the two neighbouring zone shapes
    /// are cross-faded so the surface has no cliff at the seam.
    pub fn shape(&self, d: f32, base: f32, amplitude: f32) -> f32 {
        let amplitude = amplitude.max(0.0);
        let d = d.clamp(0.0, 1.0);
        let blend = self.zones.seam_blend;

        let seams = [
            (self.zones.road_width, Zone::Road, Zone::FirstRange),
            (self.zones.first_range_end, Zone::FirstRange, Zone::SecondRange),
        ];

        let mut height = self.zone_height(self.zone(d), d, base, amplitude);
        if blend > 0.0 {
            for (boundary, inner, outer) in seams {
                if (d - boundary).abs() < blend {
                    let t = smoothstep((d - boundary + blend) / (2.0 * blend));
                    let inner_h = self.zone_height(inner, d, base, amplitude);
                    let outer_h = self.zone_height(outer, d, base, amplitude);
                    height = inner_h + (outer_h - inner_h) * t;
                }
            }
        }

        // Nothing below road level
        height.max(0.0)
    }

    /// Raw shaping formula of one zone, evaluated at any `d`
    fn zone_height(&self, zone: Zone, d: f32, base: f32, amplitude: f32) -> f32 {
        let ZoneConfig {
            road_width,
            first_range_end,
            ..
        } = self.zones;

        // Mountains trend upward with distance regardless of noise
        let linear_boost = d * amplitude * 1.5;

        match zone {
            // Near-flat corridor; the +0.2 keeps the center from collapsing to exactly zero
            Zone::Road => base * (d + 0.2).powi(4),
            Zone::FirstRange => {
                let range_pos = (d - road_width) / (first_range_end - road_width);
                let multiplier = (range_pos + 0.5).max(0.0).powf(2.5);
                base * multiplier * 1.5 + linear_boost
            }
            Zone::SecondRange => {
                let range_pos = (d - first_range_end) / (1.0 - first_range_end);
                let multiplier = (range_pos + 0.3).max(0.0).powi(2);
                base * multiplier * 3.5 + linear_boost * 2.0
            }
        }
    }
}

fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
