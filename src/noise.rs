//! Coherent noise for the terrain height field.
//!
//! Perlin gradient noise remapped to [0, 1]. Defined over the whole plane, so
//! the scroll and drift offsets can grow without bound.

use noise::{NoiseFn, Perlin};

/// Deterministic 2D noise field
#[derive(Clone)]
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    /// Create new noise field with seed
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Sample 2D noise at position
    ///
    /// Returns value in range [0, 1]
    pub fn sample(&self, x: f64, y: f64) -> f32 {
        let value = self.perlin.get([x, y]);
        ((value + 1.0) * 0.5).clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_in_unit_range() {
        let field = NoiseField::new(7);
        for i in 0..200 {
            let x = i as f64 * 0.731 - 60.0;
            let y = i as f64 * -1.37 + 1.0e6;
            let v = field.sample(x, y);
            assert!((0.0..=1.0).contains(&v), "sample {} out of range", v);
        }
    }

    #[test]
    fn test_sample_deterministic() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        assert_eq!(a.sample(3.25, -8.5), b.sample(3.25, -8.5));
    }

    #[test]
    fn test_sample_continuous() {
        let field = NoiseField::new(42);
        let mut prev = field.sample(0.0, -12.3);
        for i in 1..1000 {
            let v = field.sample(i as f64 * 1e-3, -12.3);
            assert!((v - prev).abs() < 0.01, "jump at step {}", i);
            prev = v;
        }
    }
}
