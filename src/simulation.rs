//! Synthetic brightness traces
//!
//! Generates the kind of signal a face-ROI brightness extractor would
//! produce: a pulse sinusoid riding a baseline with slow lighting drift
//! and Gaussian frame noise. Seeded, so every trace is reproducible;
//! the regression tests depend on that.

use rand::prelude::*;
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

/// Parameters for one synthetic trace.
#[derive(Debug, Clone)]
pub struct TraceSpec {
    /// Simulated heart rate in BPM
    pub bpm: f64,
    /// Sampling rate in frames per second
    pub fps: f64,
    /// Trace length in seconds
    pub duration_secs: f64,
    /// Pulse amplitude in brightness units
    pub amplitude: f64,
    /// Baseline brightness (8-bit cameras sit around mid-scale)
    pub baseline: f64,
    /// Linear lighting drift in brightness units per second
    pub drift_per_sec: f64,
    /// Standard deviation of the additive Gaussian frame noise
    pub noise_std: f64,
    /// RNG seed
    pub seed: u64,
}

impl Default for TraceSpec {
    fn default() -> Self {
        Self {
            bpm: 72.0,
            fps: 30.0,
            duration_secs: 10.0,
            amplitude: 10.0,
            baseline: 128.0,
            drift_per_sec: 0.5,
            noise_std: 0.0,
            seed: 42,
        }
    }
}

/// Generate a brightness trace for the given spec.
///
/// `noise_std` of zero produces a clean deterministic waveform; the RNG
/// is only consulted when noise is requested.
pub fn brightness_trace(spec: &TraceSpec) -> Vec<f64> {
    let n = (spec.fps * spec.duration_secs).round().max(0.0) as usize;
    let freq_hz = spec.bpm / 60.0;
    let mut rng = StdRng::seed_from_u64(spec.seed);
    let noise = Normal::new(0.0, spec.noise_std.max(0.0))
        .expect("noise_std clamped to a non-negative value");

    (0..n)
        .map(|i| {
            let t = i as f64 / spec.fps;
            let pulse = spec.amplitude * (2.0 * PI * freq_hz * t).sin();
            let drift = spec.drift_per_sec * t;
            let jitter = if spec.noise_std > 0.0 {
                noise.sample(&mut rng)
            } else {
                0.0
            };
            spec.baseline + drift + pulse + jitter
        })
        .collect()
}

/// Pure Gaussian noise with no periodic component, for negative tests.
pub fn white_noise_trace(n: usize, std_dev: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, std_dev.max(0.0))
        .expect("std_dev clamped to a non-negative value");
    (0..n).map(|_| 128.0 + noise.sample(&mut rng)).collect()
}
