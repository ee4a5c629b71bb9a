//! Peak detection with a minimum-spacing constraint
//!
//! Candidate peaks are strict local maxima. A minimum horizontal
//! distance (in samples) is then enforced: of two candidates closer than
//! the distance, the taller survives, with the earlier index winning a
//! height tie. The distance encodes an implicit upper bound on the
//! plausible heart rate, which is why the factor behind it is
//! configuration, not a constant.

use tracing::debug;

/// Find local maxima at least `min_distance` samples apart.
///
/// Returns indices into `signal`, strictly increasing. Endpoints are
/// never peaks (a peak needs both neighbors). With `min_distance` ≤ 1
/// every strict local maximum is returned.
pub fn detect_peaks(signal: &[f64], min_distance: usize) -> Vec<usize> {
    let n = signal.len();
    if n < 3 {
        return Vec::new();
    }

    // Strict local maxima: greater than both neighbors
    let mut candidates: Vec<usize> = Vec::new();
    for i in 1..n - 1 {
        if signal[i] > signal[i - 1] && signal[i] > signal[i + 1] {
            candidates.push(i);
        }
    }

    if min_distance <= 1 || candidates.len() < 2 {
        debug!(count = candidates.len(), "Peak scan (no suppression needed)");
        return candidates;
    }

    // Tallest-first suppression; earlier index wins ties
    let mut by_priority = candidates.clone();
    by_priority.sort_by(|&a, &b| signal[b].total_cmp(&signal[a]).then(a.cmp(&b)));

    let mut keep: Vec<usize> = Vec::with_capacity(by_priority.len());
    for idx in by_priority {
        let conflicts = keep
            .iter()
            .any(|&kept| kept.abs_diff(idx) < min_distance);
        if !conflicts {
            keep.push(idx);
        }
    }
    keep.sort_unstable();

    debug!(
        candidates = candidates.len(),
        kept = keep.len(),
        min_distance,
        "Peak scan"
    );
    keep
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_finds_cosine_crests() {
        // Period 30: crests exactly on samples 30, 60, 90, 120 (sample 0
        // is an endpoint and cannot qualify)
        let signal: Vec<f64> = (0..150)
            .map(|i| (2.0 * PI * i as f64 / 30.0).cos())
            .collect();
        let peaks = detect_peaks(&signal, 14);

        assert_eq!(peaks, vec![30, 60, 90, 120]);
    }

    #[test]
    fn test_min_distance_enforced() {
        // Crests every 10 samples but a 15-sample minimum distance:
        // some candidates must be suppressed and the spacing invariant
        // must hold for the survivors
        let signal: Vec<f64> = (0..200)
            .map(|i| (2.0 * PI * i as f64 / 10.0).cos())
            .collect();
        let peaks = detect_peaks(&signal, 15);

        assert!(!peaks.is_empty());
        for pair in peaks.windows(2) {
            assert!(
                pair[1] - pair[0] >= 15,
                "Spacing violated: {} then {}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_taller_peak_survives() {
        let mut signal = vec![0.0; 40];
        signal[10] = 1.0;
        signal[15] = 3.0; // taller neighbor inside the exclusion zone
        let peaks = detect_peaks(&signal, 10);
        assert_eq!(peaks, vec![15]);
    }

    #[test]
    fn test_equal_heights_earlier_index_wins() {
        let mut signal = vec![0.0; 40];
        signal[10] = 2.0;
        signal[15] = 2.0;
        let peaks = detect_peaks(&signal, 10);
        assert_eq!(peaks, vec![10]);
    }

    #[test]
    fn test_far_equal_peaks_both_kept() {
        let mut signal = vec![0.0; 60];
        signal[10] = 2.0;
        signal[40] = 2.0;
        let peaks = detect_peaks(&signal, 14);
        assert_eq!(peaks, vec![10, 40]);
    }

    #[test]
    fn test_plateau_is_not_a_strict_maximum() {
        let signal = vec![0.0, 1.0, 1.0, 0.0];
        assert!(detect_peaks(&signal, 1).is_empty());
    }

    #[test]
    fn test_endpoints_never_peak() {
        let signal = vec![5.0, 1.0, 0.5, 1.0, 6.0];
        let peaks = detect_peaks(&signal, 1);
        assert!(peaks.iter().all(|&p| p != 0 && p != signal.len() - 1));
    }

    #[test]
    fn test_too_short_for_any_peak() {
        assert!(detect_peaks(&[1.0, 2.0], 1).is_empty());
        assert!(detect_peaks(&[], 1).is_empty());
    }
}
