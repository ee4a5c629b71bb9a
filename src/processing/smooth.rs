//! Smoothing stages: Savitzky-Golay and centered moving average
//!
//! The polynomial smoother suppresses frame noise while keeping the
//! curvature of true heartbeat peaks, which a plain moving average would
//! flatten. The moving average runs later in the pipeline, after
//! normalization, where flattening no longer matters.

use super::ProcessingError;

/// Savitzky-Golay smoothing: fit a polynomial of `degree` over a sliding
/// window of `window` samples and replace each point with the fitted
/// value at that point.
///
/// Interior points use a single precomputed convolution kernel; the
/// first and last half-windows are filled from polynomial fits over the
/// leading and trailing `window` samples, so the output keeps the input
/// length without zero-padding artifacts.
///
/// # Errors
/// - [`ProcessingError::InvalidSmootherWindow`] if `window` is even or
///   does not exceed `degree`.
/// - [`ProcessingError::InsufficientData`] if the signal is shorter than
///   `window`.
pub fn savgol_smooth(
    signal: &[f64],
    window: usize,
    degree: usize,
) -> Result<Vec<f64>, ProcessingError> {
    if window % 2 == 0 {
        return Err(ProcessingError::InvalidSmootherWindow {
            window,
            reason: "must be odd",
        });
    }
    if window <= degree {
        return Err(ProcessingError::InvalidSmootherWindow {
            window,
            reason: "must exceed the polynomial degree",
        });
    }
    let n = signal.len();
    if n < window {
        return Err(ProcessingError::InsufficientData {
            stage: "polynomial smoother",
            needed: window,
            available: n,
        });
    }

    let half = window / 2;
    let kernel = center_kernel(window, degree)?;
    let mut out = vec![0.0; n];

    // Interior: plain dot product with the symmetric kernel
    for i in half..n - half {
        let mut acc = 0.0;
        for (j, &w) in kernel.iter().enumerate() {
            acc += w * signal[i - half + j];
        }
        out[i] = acc;
    }

    // Head: one fit over the first `window` samples, evaluated in place
    let head = polyfit_window(&signal[..window], degree)?;
    for (i, slot) in out.iter_mut().take(half).enumerate() {
        *slot = poly_eval(&head, i as f64);
    }

    // Tail: symmetric treatment over the last `window` samples
    let tail = polyfit_window(&signal[n - window..], degree)?;
    for k in 0..half {
        out[n - half + k] = poly_eval(&tail, (half + 1 + k) as f64);
    }

    Ok(out)
}

/// Uniform moving average with "valid" semantics, re-centered to zero
/// mean.
///
/// Only positions where the window fully overlaps the signal are kept,
/// so the output has `len - window + 1` samples. Subtracting the output
/// mean leaves a zero-mean signal ready for peak detection.
///
/// # Errors
/// - [`ProcessingError::InvalidSmootherWindow`] if `window` is zero.
/// - [`ProcessingError::InsufficientData`] if the signal is shorter than
///   `window`.
pub fn moving_average_centered(
    signal: &[f64],
    window: usize,
) -> Result<Vec<f64>, ProcessingError> {
    if window == 0 {
        return Err(ProcessingError::InvalidSmootherWindow {
            window,
            reason: "must be at least 1",
        });
    }
    let n = signal.len();
    if n < window {
        return Err(ProcessingError::InsufficientData {
            stage: "moving average",
            needed: window,
            available: n,
        });
    }

    let mut out = Vec::with_capacity(n - window + 1);
    let mut sum: f64 = signal[..window].iter().sum();
    out.push(sum / window as f64);
    for i in window..n {
        sum += signal[i] - signal[i - window];
        out.push(sum / window as f64);
    }

    let mean = out.iter().sum::<f64>() / out.len() as f64;
    for v in &mut out {
        *v -= mean;
    }
    Ok(out)
}

/// Convolution kernel giving the fitted value at the window center.
///
/// Solves the normal equations `G m = e₀` for the window positions
/// `-half..=half`, then expands `m` back onto the positions. The kernel
/// only depends on (window, degree), not on the data.
fn center_kernel(window: usize, degree: usize) -> Result<Vec<f64>, ProcessingError> {
    let half = (window / 2) as i64;
    let positions: Vec<f64> = (-half..=half).map(|x| x as f64).collect();

    let dim = degree + 1;
    let mut gram = vec![vec![0.0; dim]; dim];
    for (r, row) in gram.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = positions.iter().map(|&x| x.powi((r + c) as i32)).sum();
        }
    }
    let mut rhs = vec![0.0; dim];
    rhs[0] = 1.0;

    let m = solve_linear(gram, rhs, window)?;
    Ok(positions
        .iter()
        .map(|&x| m.iter().enumerate().map(|(k, &mk)| mk * x.powi(k as i32)).sum())
        .collect())
}

/// Least-squares polynomial fit over a full window, positions `0..len`.
/// Returns coefficients `a₀..a_degree`.
fn polyfit_window(values: &[f64], degree: usize) -> Result<Vec<f64>, ProcessingError> {
    let dim = degree + 1;
    let mut gram = vec![vec![0.0; dim]; dim];
    let mut rhs = vec![0.0; dim];

    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        for r in 0..dim {
            let xr = x.powi(r as i32);
            rhs[r] += xr * y;
            for c in 0..dim {
                gram[r][c] += xr * x.powi(c as i32);
            }
        }
    }

    solve_linear(gram, rhs, values.len())
}

fn poly_eval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Gaussian elimination with partial pivoting for the small (≤ degree+1)
/// normal-equation systems above.
fn solve_linear(
    mut a: Vec<Vec<f64>>,
    mut b: Vec<f64>,
    window: usize,
) -> Result<Vec<f64>, ProcessingError> {
    let dim = b.len();
    for col in 0..dim {
        let pivot_row = (col..dim)
            .max_by(|&r1, &r2| a[r1][col].abs().total_cmp(&a[r2][col].abs()))
            .unwrap_or(col);
        if a[pivot_row][col].abs() < 1e-12 {
            return Err(ProcessingError::InvalidSmootherWindow {
                window,
                reason: "ill-conditioned polynomial fit",
            });
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in col + 1..dim {
            let factor = a[row][col] / a[col][col];
            for k in col..dim {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; dim];
    for row in (0..dim).rev() {
        let mut acc = b[row];
        for k in row + 1..dim {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_savgol_preserves_quadratic_exactly() {
        // A degree-2 fit reproduces any quadratic, edges included
        let signal: Vec<f64> = (0..50)
            .map(|i| {
                let t = i as f64;
                0.3 * t * t - 2.0 * t + 5.0
            })
            .collect();

        let out = savgol_smooth(&signal, 9, 2).unwrap();
        assert_eq!(out.len(), signal.len());
        for (o, s) in out.iter().zip(signal.iter()) {
            assert_relative_eq!(o, s, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_savgol_attenuates_alternating_noise() {
        // +1/-1 alternation is the highest representable frequency; the
        // smoother should crush it
        let signal: Vec<f64> = (0..100).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let out = savgol_smooth(&signal, 9, 2).unwrap();

        let in_power = signal.iter().map(|x| x * x).sum::<f64>() / signal.len() as f64;
        let out_power = out.iter().map(|x| x * x).sum::<f64>() / out.len() as f64;
        assert!(
            out_power < 0.3 * in_power,
            "Alternating noise survived: {out_power} vs {in_power}"
        );
    }

    #[test]
    fn test_savgol_rejects_even_window() {
        let err = savgol_smooth(&[0.0; 20], 8, 2).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::InvalidSmootherWindow { window: 8, .. }
        ));
    }

    #[test]
    fn test_savgol_rejects_degree_not_below_window() {
        let err = savgol_smooth(&[0.0; 20], 3, 3).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidSmootherWindow { .. }));
    }

    #[test]
    fn test_savgol_window_longer_than_signal() {
        let err = savgol_smooth(&[0.0; 5], 9, 2).unwrap_err();
        assert_eq!(
            err,
            ProcessingError::InsufficientData {
                stage: "polynomial smoother",
                needed: 9,
                available: 5,
            }
        );
    }

    #[test]
    fn test_moving_average_valid_length_and_values() {
        let out = moving_average_centered(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        // Valid means are [2, 3, 4]; centered they become [-1, 0, 1]
        assert_eq!(out.len(), 3);
        assert_relative_eq!(out[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(out[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(out[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_moving_average_output_is_zero_mean() {
        let signal: Vec<f64> = (0..100)
            .map(|i| 50.0 + (i as f64 * 0.7).sin() * 3.0)
            .collect();
        let out = moving_average_centered(&signal, 5).unwrap();
        assert_eq!(out.len(), 96);
        let mean = out.iter().sum::<f64>() / out.len() as f64;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_moving_average_window_one_is_centering_only() {
        let out = moving_average_centered(&[1.0, 3.0, 5.0], 1).unwrap();
        assert_eq!(out, vec![-2.0, 0.0, 2.0]);
    }

    #[test]
    fn test_moving_average_short_signal() {
        let err = moving_average_centered(&[1.0, 2.0], 5).unwrap_err();
        assert!(matches!(
            err,
            ProcessingError::InsufficientData {
                stage: "moving average",
                ..
            }
        ));
    }

    #[test]
    fn test_moving_average_zero_window() {
        let err = moving_average_centered(&[1.0, 2.0], 0).unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidSmootherWindow { .. }));
    }
}
