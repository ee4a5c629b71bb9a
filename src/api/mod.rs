//! Request/response boundary for the estimator
//!
//! The wire contract any serving layer must speak: a request carrying
//! `brightness` (required) and `fps` (optional), answered by
//! `{"bpm": <number-or-null>}` on success or `{"error": "<message>"}`
//! with a matching HTTP status on failure. Input validation happens
//! here, before the pipeline is entered; the DSP core never sees a
//! missing or non-finite payload.
//!
//! This module is pure data mapping; it owns no socket and no process
//! lifecycle.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EstimatorConfig;
use crate::estimator::estimate_heart_rate;
use crate::processing::ProcessingError;

/// Incoming estimation request.
///
/// `brightness` is modeled as `Option` so that an absent field and an
/// empty array can be told apart from a deserialization failure and
/// rejected with a typed error.
#[derive(Debug, Clone, Deserialize)]
pub struct HeartRateRequest {
    pub brightness: Option<Vec<f64>>,
    pub fps: Option<f64>,
}

/// Successful response body: `{"bpm": 72.41}` or `{"bpm": null}` when
/// the rate is undetermined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateResponse {
    pub bpm: Option<f64>,
}

/// Error response body: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Rejections raised at the boundary, before the pipeline runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Absent or empty `brightness` field. Message matches the wire
    /// contract verbatim.
    #[error("Missing brightness data")]
    MissingBrightness,

    #[error("Brightness sample {index} is not a finite number")]
    NonFiniteBrightness { index: usize },

    #[error("Invalid fps: {0} (must be a positive number)")]
    InvalidFps(f64),
}

/// Anything a request can fail with, tagged with the HTTP status a
/// serving layer should answer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

impl ApiError {
    /// HTTP status for this error: 400 for malformed requests, 422 for
    /// well-formed requests the signal cannot satisfy, 500 for broken
    /// server-side configuration.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Input(_) => 400,
            Self::Processing(p) => match p {
                ProcessingError::InvalidSamplingRate(_) => 400,
                ProcessingError::InvalidCutoffs { .. }
                | ProcessingError::InsufficientData { .. }
                | ProcessingError::DegenerateSignal => 422,
                ProcessingError::InvalidSmootherWindow { .. }
                | ProcessingError::FilterDesign { .. } => 500,
            },
        }
    }

    /// Wire body for this error.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

/// Validate a request and run the estimator.
///
/// `fps` defaults from the config when absent. All boundary rejections
/// surface as [`ApiError::Input`]; pipeline failures pass through as
/// [`ApiError::Processing`]; an undetermined rate is a *success* with a
/// null `bpm`.
pub fn handle(
    request: &HeartRateRequest,
    config: &EstimatorConfig,
) -> Result<HeartRateResponse, ApiError> {
    let brightness = match request.brightness.as_deref() {
        None | Some([]) => return Err(InputError::MissingBrightness.into()),
        Some(values) => values,
    };

    if let Some(index) = brightness.iter().position(|v| !v.is_finite()) {
        return Err(InputError::NonFiniteBrightness { index }.into());
    }

    let fps = request.fps.unwrap_or(config.input.default_fps);
    if !fps.is_finite() || fps <= 0.0 {
        return Err(InputError::InvalidFps(fps).into());
    }

    let bpm = estimate_heart_rate(brightness, fps, config)?;
    Ok(HeartRateResponse { bpm })
}
