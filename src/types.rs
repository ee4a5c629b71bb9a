//! Shared result types

use serde::{Deserialize, Serialize};

/// Full outcome of one estimation run.
///
/// `bpm` carries the 2-decimal estimate, or `None` when fewer than two
/// qualifying peaks were found. An undetermined rate is a legitimate
/// result, not an error. The remaining fields exist for diagnostics and
/// logging; they are not part of the minimal wire contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateReport {
    /// Estimated heart rate in beats per minute, rounded to 2 decimals
    pub bpm: Option<f64>,

    /// Number of input brightness samples
    pub samples: usize,

    /// Sampling rate the estimate was computed at
    pub fps: f64,

    /// Peaks that survived the minimum-distance constraint
    pub peak_count: usize,

    /// Effective minimum peak spacing in samples (`round(fps × factor)`)
    pub min_peak_distance_samples: usize,

    /// Mean beat-to-beat interval in seconds, when at least two peaks
    /// were found
    pub mean_beat_interval_secs: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_bpm_null_when_undetermined() {
        let report = HeartRateReport {
            bpm: None,
            samples: 40,
            fps: 30.0,
            peak_count: 1,
            min_peak_distance_samples: 14,
            mean_beat_interval_secs: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["bpm"].is_null());
        assert_eq!(json["peak_count"], 1);
    }

    #[test]
    fn test_report_roundtrip() {
        let report = HeartRateReport {
            bpm: Some(72.0),
            samples: 300,
            fps: 30.0,
            peak_count: 12,
            min_peak_distance_samples: 14,
            mean_beat_interval_secs: Some(0.8333),
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: HeartRateReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
