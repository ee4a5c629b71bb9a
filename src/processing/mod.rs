//! Signal processing stages for the brightness-to-BPM pipeline
//!
//! Each stage is a pure function over a borrowed slice; stages never
//! mutate their input and never share state between invocations. The
//! orchestration order lives in [`crate::estimator`].

mod bandpass;
mod detrend;
mod normalize;
mod peaks;
mod smooth;

pub use bandpass::{bandpass_filtfilt, min_signal_len};
pub use detrend::detrend_linear;
pub use normalize::zscore;
pub use peaks::detect_peaks;
pub use smooth::{moving_average_centered, savgol_smooth};

use thiserror::Error;

/// Errors in the DSP pipeline.
///
/// Every variant aborts the whole estimation; none degrade into NaN
/// results downstream.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("Invalid sampling rate: {0} fps (must be > 0)")]
    InvalidSamplingRate(f64),

    #[error(
        "Invalid bandpass cutoffs: lowcut {lowcut} Hz, highcut {highcut} Hz \
         (need 0 < lowcut < highcut < Nyquist {nyquist} Hz)"
    )]
    InvalidCutoffs {
        lowcut: f64,
        highcut: f64,
        nyquist: f64,
    },

    #[error("Invalid smoothing window {window}: {reason}")]
    InvalidSmootherWindow { window: usize, reason: &'static str },

    #[error("Bandpass design produced no usable filter (order {order})")]
    FilterDesign { order: usize },

    #[error("Insufficient data for {stage}: need {needed} samples, have {available}")]
    InsufficientData {
        stage: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("Degenerate signal: zero variance at normalization")]
    DegenerateSignal,
}
