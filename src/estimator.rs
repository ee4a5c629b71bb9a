//! Heart rate estimation pipeline
//!
//! Straight-line stage sequence over one brightness series:
//! detrend → bandpass → Savitzky-Golay → z-score → moving average →
//! peak detection → intervals → BPM. There is exactly one decision
//! point: fewer than two qualifying peaks ends in the "undetermined"
//! outcome (`Ok` with no BPM); every other stage either passes its
//! output forward or aborts the whole computation with a typed error.
//!
//! The pipeline is pure and stateless: each call works on its own
//! freshly allocated data, so concurrent calls need no locking.

use tracing::debug;

use crate::config::EstimatorConfig;
use crate::processing::{
    bandpass_filtfilt, detect_peaks, detrend_linear, moving_average_centered, savgol_smooth,
    zscore, ProcessingError,
};
use crate::types::HeartRateReport;

/// Estimate a heart rate in BPM from per-frame brightness samples.
///
/// Returns `Ok(None)` when fewer than two peaks satisfy the
/// minimum-distance constraint: the rate is undetermined, which is a
/// valid outcome, distinct from failure. Otherwise returns the estimate
/// rounded to 2 decimal places.
///
/// # Errors
/// [`ProcessingError`] when the sampling rate or filter cutoffs are
/// invalid, the signal is too short for the configured stages, or the
/// signal has zero variance.
pub fn estimate_heart_rate(
    brightness: &[f64],
    fps: f64,
    config: &EstimatorConfig,
) -> Result<Option<f64>, ProcessingError> {
    estimate_with_report(brightness, fps, config).map(|report| report.bpm)
}

/// Run the full pipeline and return the estimate together with its
/// diagnostics.
///
/// Same contract as [`estimate_heart_rate`]; see there for the error
/// cases.
pub fn estimate_with_report(
    brightness: &[f64],
    fps: f64,
    config: &EstimatorConfig,
) -> Result<HeartRateReport, ProcessingError> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(ProcessingError::InvalidSamplingRate(fps));
    }

    debug!(samples = brightness.len(), fps, "Starting heart rate estimation");

    let detrended = detrend_linear(brightness)?;
    let filtered = bandpass_filtfilt(&detrended, fps, &config.filter)?;
    let smoothed = savgol_smooth(
        &filtered,
        config.smoothing.savgol_window,
        config.smoothing.savgol_degree,
    )?;
    let refined = zscore(&smoothed)?;
    let pulse = moving_average_centered(&refined, config.smoothing.moving_average_window)?;

    let min_distance = config.peaks.min_distance_samples(fps);
    let peaks = detect_peaks(&pulse, min_distance);
    debug!(
        peaks = peaks.len(),
        min_distance, "Peak detection complete"
    );

    if peaks.len() < 2 {
        debug!("Fewer than 2 peaks, rate undetermined");
        return Ok(HeartRateReport {
            bpm: None,
            samples: brightness.len(),
            fps,
            peak_count: peaks.len(),
            min_peak_distance_samples: min_distance,
            mean_beat_interval_secs: None,
        });
    }

    let intervals = beat_intervals(&peaks, fps);
    let mean_interval = intervals.iter().sum::<f64>() / intervals.len() as f64;
    let bpm = round2(60.0 / mean_interval);
    debug!(bpm, mean_interval_secs = mean_interval, "Estimation complete");

    Ok(HeartRateReport {
        bpm: Some(bpm),
        samples: brightness.len(),
        fps,
        peak_count: peaks.len(),
        min_peak_distance_samples: min_distance,
        mean_beat_interval_secs: Some(mean_interval),
    })
}

/// Seconds between consecutive peaks.
fn beat_intervals(peaks: &[usize], fps: f64) -> Vec<f64> {
    peaks
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64 / fps)
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
