//! Forward travel bookkeeping.
//!
//! The lattice never moves more than one cell: the sub-cell offset wraps at
//! `cell_size` and the completed wraps are counted, so heights can be sampled
//! at the travelled-over lattice row without any floating-point drift.

use crate::params::LandscapeParams;

/// Scroll offset and noise drift, advanced once per frame
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    cell_size: f32,
    /// World units per second of forward travel
    speed: f64,
    /// Noise units per second the bump pattern drifts
    noise_drift_per_s: f64,

    /// Sub-cell displacement, always in [0, cell_size)
    offset: f64,
    /// Completed cell wraps
    cells_travelled: i64,
    /// Unbounded drift of the noise sampling coordinate
    noise_offset: f64,
}

impl ScrollState {
    pub fn new(params: &LandscapeParams) -> Self {
        let cell_size = params.grid.cell_size;
        Self {
            cell_size,
            speed: cell_size as f64 / params.scroll_period_s as f64,
            noise_drift_per_s: params.noise_drift_per_s as f64,
            offset: 0.0,
            cells_travelled: 0,
            noise_offset: 0.0,
        }
    }

    /// Advance by elapsed time; one full cell takes exactly `scroll_period_s`
    ///
    /// Negative or non-finite deltas are ignored.
    pub fn advance(&mut self, delta_s: f32) {
        if !(delta_s.is_finite() && delta_s > 0.0) {
            return;
        }
        let dt = delta_s as f64;
        let cell = self.cell_size as f64;

        self.offset += self.speed * dt;
        // Keep the remainder rather than reset so the mesh never jumps
        if self.offset >= cell {
            let wraps = self.offset.div_euclid(cell);
            self.offset = self.offset.rem_euclid(cell);
            self.cells_travelled = self.cells_travelled.saturating_add(wraps as i64);
        }

        self.noise_offset -= self.noise_drift_per_s * dt;
    }

    /// Sub-cell displacement in [0, cell_size)
    pub fn offset(&self) -> f32 {
        // Rounding to f32 can land exactly on cell_size; step down one ulp
        let offset = self.offset as f32;
        if offset >= self.cell_size {
            f32::from_bits(self.cell_size.to_bits() - 1)
        } else {
            offset
        }
    }

    pub fn cells_travelled(&self) -> i64 {
        self.cells_travelled
    }

    pub fn noise_offset(&self) -> f64 {
        self.noise_offset
    }

    /// Total forward travel in world units
    pub fn distance(&self) -> f64 {
        self.cells_travelled as f64 * self.cell_size as f64 + self.offset
    }

    /// Terrain row under lattice row `row`, counted from where travel started
    ///
    /// A vertex at scrolled position `row * cell_size + offset` sits over world
    /// position `scrolled - distance()`, which is always a whole number of cells.
    pub fn world_row(&self, row: usize) -> i64 {
        row as i64 - self.cells_travelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(cell_size: f32, scroll_period_s: f32) -> LandscapeParams {
        let mut params = LandscapeParams::default();
        params.grid.cell_size = cell_size;
        params.scroll_period_s = scroll_period_s;
        params.noise_drift_per_s = 0.5;
        params
    }

    #[test]
    fn test_offset_stays_in_cell() {
        let mut scroll = ScrollState::new(&params(40.0, 0.35));
        for _ in 0..10_000 {
            scroll.advance(1.0 / 60.0);
            let offset = scroll.offset();
            assert!((0.0..40.0).contains(&offset), "offset {} escaped", offset);
        }
    }

    #[test]
    fn test_one_period_is_one_cell() {
        let mut scroll = ScrollState::new(&params(10.0, 2.0));
        scroll.advance(0.5);
        assert!((scroll.offset() - 2.5).abs() < 1e-5);
        assert_eq!(scroll.cells_travelled(), 0);

        let before = scroll.offset();
        scroll.advance(2.0);
        assert_eq!(scroll.cells_travelled(), 1);
        assert!((scroll.offset() - before).abs() < 1e-4);
        assert!((scroll.distance() - 12.5).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_subtracts_exactly() {
        let mut scroll = ScrollState::new(&params(10.0, 1.0));
        scroll.advance(0.75); // 7.5
        scroll.advance(0.5); // 12.5 -> 2.5, not 0
        assert!((scroll.offset() - 2.5).abs() < 1e-5);
        assert_eq!(scroll.cells_travelled(), 1);
    }

    #[test]
    fn test_large_step_wraps_many_cells() {
        let mut scroll = ScrollState::new(&params(1.0, 1.0));
        scroll.advance(7.25);
        assert_eq!(scroll.cells_travelled(), 7);
        assert!((scroll.offset() - 0.25).abs() < 1e-5);
        assert_eq!(scroll.world_row(10), 3);
    }

    #[test]
    fn test_huge_delta_terminates() {
        let mut scroll = ScrollState::new(&params(40.0, 0.357));
        scroll.advance(1.0e16);

        assert!(scroll.cells_travelled() > 1_000_000_000_000_000);
        assert!(scroll.offset() >= 0.0 && scroll.offset() < 40.0);

        // Still advances normally afterwards
        let before = scroll.cells_travelled();
        scroll.advance(1.0);
        assert!(scroll.cells_travelled() >= before);
        assert!(scroll.offset() >= 0.0 && scroll.offset() < 40.0);
    }

    #[test]
    fn test_invalid_deltas_ignored() {
        let mut scroll = ScrollState::new(&params(10.0, 1.0));
        let initial = scroll.clone();
        scroll.advance(-1.0);
        scroll.advance(f32::NAN);
        scroll.advance(f32::INFINITY);
        scroll.advance(0.0);
        assert_eq!(scroll, initial);
    }

    #[test]
    fn test_noise_offset_drifts_unbounded() {
        let mut scroll = ScrollState::new(&params(10.0, 1.0));
        let mut prev = scroll.noise_offset();
        for _ in 0..1000 {
            scroll.advance(0.1);
            assert!(scroll.noise_offset() < prev);
            prev = scroll.noise_offset();
        }
        assert!((scroll.noise_offset() + 50.0).abs() < 1e-4);
    }
}
