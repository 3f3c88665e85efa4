//! Waveform access for the frame loop.

use std::sync::{Arc, Mutex};

/// Anything that can hand the frame loop a snapshot of recent audio
pub trait WaveformSource {
    /// Copy the most recent `out.len()` mono samples into `out`
    ///
    /// Returns `false` when nothing is playing; `out` is left untouched then.
    fn read_waveform(&self, out: &mut [f32]) -> bool;
}

/// Fixed-capacity history of the most recent samples, shared with the audio thread
#[derive(Debug)]
pub struct WaveformRing {
    samples: Vec<f32>,
    /// Next write position
    head: usize,
    /// Samples written so far, saturating at capacity
    filled: usize,
}

impl WaveformRing {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: vec![0.0; capacity.max(1)],
            head: 0,
            filled: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    pub fn push(&mut self, sample: f32) {
        self.samples[self.head] = sample;
        self.head = (self.head + 1) % self.samples.len();
        self.filled = (self.filled + 1).min(self.samples.len());
    }

    /// Copy the newest samples into `out`, oldest first
    ///
    /// When fewer samples than `out.len()` are available the front of `out`
    /// is zero-filled. Returns `false` if nothing has been written yet.
    pub fn copy_latest(&self, out: &mut [f32]) -> bool {
        if self.filled == 0 {
            return false;
        }

        let cap = self.samples.len();
        let take = out.len().min(self.filled);
        let pad = out.len() - take;
        out[..pad].fill(0.0);

        let start = (self.head + cap - take) % cap;
        for (i, slot) in out[pad..].iter_mut().enumerate() {
            *slot = self.samples[(start + i) % cap];
        }
        true
    }
}

impl WaveformSource for Mutex<WaveformRing> {
    fn read_waveform(&self, out: &mut [f32]) -> bool {
        match self.lock() {
            Ok(ring) => ring.copy_latest(out),
            Err(_) => false,
        }
    }
}

impl<T: WaveformSource + ?Sized> WaveformSource for Arc<T> {
    fn read_waveform(&self, out: &mut [f32]) -> bool {
        (**self).read_waveform(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring_reports_silence() {
        let ring = WaveformRing::new(8);
        let mut out = [1.0; 4];
        assert!(!ring.copy_latest(&mut out));
        assert_eq!(out, [1.0; 4]);
    }

    #[test]
    fn test_partial_fill_zero_pads() {
        let mut ring = WaveformRing::new(8);
        ring.push(1.0);
        ring.push(2.0);
        let mut out = [9.0; 4];
        assert!(ring.copy_latest(&mut out));
        assert_eq!(out, [0.0, 0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_wraps_keeping_latest() {
        let mut ring = WaveformRing::new(4);
        for i in 0..10 {
            ring.push(i as f32);
        }
        let mut out = [0.0; 4];
        ring.copy_latest(&mut out);
        assert_eq!(out, [6.0, 7.0, 8.0, 9.0]);

        let mut short = [0.0; 2];
        ring.copy_latest(&mut short);
        assert_eq!(short, [8.0, 9.0]);
    }

    #[test]
    fn test_shared_ring_is_a_source() {
        let ring = Arc::new(Mutex::new(WaveformRing::new(4)));
        ring.lock().unwrap().push(0.5);
        let mut out = [0.0; 1];
        assert!(ring.read_waveform(&mut out));
        assert_eq!(out, [0.5]);
    }
}
