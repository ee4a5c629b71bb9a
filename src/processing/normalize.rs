//! Z-score normalization with an explicit zero-variance guard

use statrs::statistics::Statistics;

use super::ProcessingError;

/// Rescale a signal to zero mean and unit variance:
/// `(x - mean) / std`, population standard deviation.
///
/// A constant signal has zero variance; dividing by it would flood the
/// rest of the pipeline with NaN, so that case is rejected up front.
///
/// # Errors
/// [`ProcessingError::DegenerateSignal`] when the standard deviation is
/// zero (or not a finite number).
pub fn zscore(signal: &[f64]) -> Result<Vec<f64>, ProcessingError> {
    if signal.is_empty() {
        return Err(ProcessingError::InsufficientData {
            stage: "normalizer",
            needed: 1,
            available: 0,
        });
    }

    let mean = signal.mean();
    let std = signal.population_std_dev();
    if !std.is_finite() || std <= 0.0 {
        return Err(ProcessingError::DegenerateSignal);
    }

    Ok(signal.iter().map(|&x| (x - mean) / std).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::statistics::Statistics;

    #[test]
    fn test_zero_mean_unit_variance() {
        let signal = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = zscore(&signal).unwrap();

        assert_relative_eq!((&out).mean(), 0.0, epsilon = 1e-12);
        assert_relative_eq!((&out).population_std_dev(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_known_values() {
        // Population std of [2,4,4,4,5,5,7,9] is exactly 2
        let signal = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let out = zscore(&signal).unwrap();
        assert_relative_eq!(out[0], -1.5, epsilon = 1e-12);
        assert_relative_eq!(out[7], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_signal_is_degenerate() {
        let err = zscore(&[128.0; 64]).unwrap_err();
        assert_eq!(err, ProcessingError::DegenerateSignal);
    }

    #[test]
    fn test_no_nan_in_output() {
        let signal: Vec<f64> = (0..128).map(|i| (i as f64 * 0.37).sin()).collect();
        let out = zscore(&signal).unwrap();
        assert!(out.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_empty_signal() {
        let err = zscore(&[]).unwrap_err();
        assert!(matches!(err, ProcessingError::InsufficientData { .. }));
    }
}
