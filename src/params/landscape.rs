//! Terrain lattice, zone layout and animation parameters.

use crate::error::ConfigError;

/// Fixed lattice the terrain is sampled on
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Lattice points across the road (lateral axis)
    pub columns: usize,

    /// Lattice points along the road (longitudinal axis)
    pub rows: usize,

    /// Spacing between lattice points in world units
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        // 1920 x 2160 world units at 40 units per cell
        Self {
            columns: 48,
            rows: 54,
            cell_size: 40.0,
        }
    }
}

impl GridConfig {
    /// Total longitudinal extent, the period at which scrolled rows wrap
    pub fn longitudinal_period(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Total lateral extent
    pub fn width(&self) -> f32 {
        (self.columns - 1) as f32 * self.cell_size
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < 2 || self.rows < 2 {
            return Err(ConfigError::DegenerateGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        Ok(())
    }
}

/// Lateral zone boundaries, as fractions of the half-width measured from the center line
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneConfig {
    /// Below this distance the terrain is the flat road
    pub road_width: f32,

    /// Between `road_width` and this distance lies the first mountain range;
    /// beyond it, the second (taller) range
    pub first_range_end: f32,

    /// Half-width of the cross-fade band around each boundary (0 = hard seams)
    pub seam_blend: f32,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            road_width: 0.15,
            first_range_end: 0.35,
            seam_blend: 0.02,
        }
    }
}

impl ZoneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = 0.0 < self.road_width
            && self.road_width < self.first_range_end
            && self.first_range_end < 1.0;
        if !ordered {
            return Err(ConfigError::ZoneOrder {
                road_width: self.road_width,
                first_range_end: self.first_range_end,
            });
        }

        // Blend bands must not touch each other, the center line or the outer edge
        let b = self.seam_blend;
        let fits = b >= 0.0
            && b < self.road_width
            && self.road_width + b < self.first_range_end - b
            && self.first_range_end + b < 1.0;
        if !fits {
            return Err(ConfigError::SeamBlend { seam_blend: b });
        }
        Ok(())
    }
}

/// Everything the landscape pipeline needs, fixed for the session
#[derive(Debug, Clone)]
pub struct LandscapeParams {
    pub grid: GridConfig,
    pub zones: ZoneConfig,

    /// Noise units per lattice cell (controls bump size)
    pub noise_scale: f32,

    /// Perlin noise seed
    pub noise_seed: u32,

    /// Terrain height scale before audio modulation (world units)
    pub base_amplitude: f32,

    /// How strongly intensity inflates the amplitude:
    /// amplitude = base_amplitude * (1 + intensity * audio_sensitivity)
    pub audio_sensitivity: f32,

    /// Seconds for the terrain to scroll forward by one cell
    pub scroll_period_s: f32,

    /// Noise units per second the bump pattern drifts, independent of the scroll
    pub noise_drift_per_s: f32,
}

impl Default for LandscapeParams {
    fn default() -> Self {
        let noise_scale = 0.15;
        // 0.007 noise units per frame at 60 fps
        let noise_drift_per_s = 0.007 * 60.0;

        Self {
            grid: GridConfig::default(),
            zones: ZoneConfig::default(),
            noise_scale,
            noise_seed: 42,
            base_amplitude: 100.0,
            audio_sensitivity: 2.5,
            // Scroll and drift move through noise space at the same rate
            scroll_period_s: noise_scale / noise_drift_per_s,
            noise_drift_per_s,
        }
    }
}

impl LandscapeParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.zones.validate()?;

        positive("noise_scale", self.noise_scale)?;
        positive("scroll_period_s", self.scroll_period_s)?;
        non_negative("base_amplitude", self.base_amplitude)?;
        non_negative("audio_sensitivity", self.audio_sensitivity)?;
        if !self.noise_drift_per_s.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "noise_drift_per_s",
                value: self.noise_drift_per_s,
            });
        }
        Ok(())
    }
}

pub(crate) fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(LandscapeParams::default().validate(), Ok(()));
    }

    #[test]
    fn test_degenerate_grid_rejected() {
        let grid = GridConfig {
            columns: 1,
            rows: 10,
            cell_size: 1.0,
        };
        assert_eq!(
            grid.validate(),
            Err(ConfigError::DegenerateGrid {
                columns: 1,
                rows: 10
            })
        );

        let grid = GridConfig {
            columns: 4,
            rows: 1,
            cell_size: 1.0,
        };
        assert!(grid.validate().is_err());
    }

    #[test]
    fn test_zero_cell_size_rejected() {
        let grid = GridConfig {
            cell_size: 0.0,
            ..GridConfig::default()
        };
        assert_eq!(grid.validate(), Err(ConfigError::CellSize(0.0)));
    }

    #[test]
    fn test_zone_order() {
        let zones = ZoneConfig {
            road_width: 0.5,
            first_range_end: 0.4,
            seam_blend: 0.0,
        };
        assert!(matches!(
            zones.validate(),
            Err(ConfigError::ZoneOrder { .. })
        ));

        let zones = ZoneConfig {
            road_width: 0.2,
            first_range_end: 0.3,
            seam_blend: 0.06,
        };
        assert!(matches!(zones.validate(), Err(ConfigError::SeamBlend { .. })));
    }

    #[test]
    fn test_scroll_and_drift_in_lockstep() {
        let params = LandscapeParams::default();
        let scroll_rate = params.noise_scale / params.scroll_period_s;
        assert!((scroll_rate - params.noise_drift_per_s).abs() < 1e-5);
    }

    #[test]
    fn test_drift_may_be_zero_or_negative_but_finite() {
        let mut params = LandscapeParams::default();
        params.noise_drift_per_s = 0.0;
        assert!(params.validate().is_ok());
        params.noise_drift_per_s = -0.3;
        assert!(params.validate().is_ok());

        params.noise_drift_per_s = f32::INFINITY;
        assert!(matches!(
            params.validate(),
            Err(ConfigError::NotFinite {
                name: "noise_drift_per_s",
                ..
            })
        ));
    }

    #[test]
    fn test_longitudinal_period() {
        let grid = GridConfig {
            columns: 3,
            rows: 5,
            cell_size: 2.0,
        };
        assert_eq!(grid.longitudinal_period(), 10.0);
        assert_eq!(grid.width(), 4.0);
    }
}
