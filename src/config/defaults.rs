//! Default values for every estimator parameter.
//!
//! Centralized so the TOML layer (`#[serde(default = ...)]`) and the
//! `Default` impls cannot drift apart.

/// Bandpass low cutoff (Hz). 0.7 Hz ≈ 42 BPM.
pub fn lowcut_hz() -> f64 {
    0.7
}

/// Bandpass high cutoff (Hz). 4.0 Hz ≈ 240 BPM.
pub fn highcut_hz() -> f64 {
    4.0
}

/// Butterworth filter order. The bandpass expands to `order`
/// second-order sections.
pub fn filter_order() -> usize {
    4
}

/// Savitzky-Golay window length (samples). Must be odd.
pub fn savgol_window() -> usize {
    9
}

/// Savitzky-Golay polynomial degree.
pub fn savgol_degree() -> usize {
    2
}

/// Moving-average window length (samples).
pub fn moving_average_window() -> usize {
    5
}

/// Minimum peak spacing as a fraction of one second of frames.
///
/// The effective distance is `round(fps × factor)` samples, which caps
/// the detectable rate at `60 / factor` BPM (≈ 133 BPM at the default).
pub fn min_distance_factor() -> f64 {
    0.45
}

/// Sampling rate assumed when a request does not carry one.
pub fn default_fps() -> f64 {
    30.0
}
