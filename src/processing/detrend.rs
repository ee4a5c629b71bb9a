//! Linear detrending - removes slow drift from the raw brightness series

use super::ProcessingError;

/// Remove the best-fit linear trend from a signal.
///
/// Fits `y = a + b·t` by least squares over sample indices and subtracts
/// it, leaving the residual. Lighting drift over a capture window is
/// close to linear, so this takes out the DC offset and the slow ramp
/// without shifting any peak in time.
///
/// # Errors
/// [`ProcessingError::InsufficientData`] if the signal has fewer than 2
/// samples (a line fit needs two points).
pub fn detrend_linear(signal: &[f64]) -> Result<Vec<f64>, ProcessingError> {
    let n = signal.len();
    if n < 2 {
        return Err(ProcessingError::InsufficientData {
            stage: "detrend",
            needed: 2,
            available: n,
        });
    }

    let n_f = n as f64;
    let t_mean = (n_f - 1.0) / 2.0;
    let y_mean = signal.iter().sum::<f64>() / n_f;

    // slope = Σ(t - t̄)(y - ȳ) / Σ(t - t̄)²
    let mut cov = 0.0;
    let mut var_t = 0.0;
    for (i, &y) in signal.iter().enumerate() {
        let dt = i as f64 - t_mean;
        cov += dt * (y - y_mean);
        var_t += dt * dt;
    }
    let slope = cov / var_t;
    let intercept = y_mean - slope * t_mean;

    Ok(signal
        .iter()
        .enumerate()
        .map(|(i, &y)| y - (intercept + slope * i as f64))
        .collect())
}
