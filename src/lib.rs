//! Pulseframe: heart rate from video brightness
//!
//! Remote photoplethysmography (rPPG) estimation core. Takes one series
//! of per-frame brightness samples and turns it into a BPM value through
//! a classical DSP pipeline:
//!
//! detrend → Butterworth bandpass (zero-phase) → Savitzky-Golay →
//! z-score → moving average → peak detection → beat intervals → BPM.
//!
//! The crate is a pure library: no server, no global state, no I/O in
//! the estimation path. [`api`] defines the JSON wire shapes a serving
//! layer is expected to speak.
//!
//! ```
//! use pulseframe::{estimate_heart_rate, EstimatorConfig};
//!
//! let config = EstimatorConfig::default();
//! let brightness: Vec<f64> = (0..300)
//!     .map(|i| {
//!         let t = f64::from(i) / 30.0;
//!         128.0 + 10.0 * (2.0 * std::f64::consts::PI * 1.2 * t).sin()
//!     })
//!     .collect();
//!
//! let bpm = estimate_heart_rate(&brightness, 30.0, &config).unwrap();
//! assert!(bpm.is_some()); // ~72 BPM
//! ```

pub mod api;
pub mod config;
pub mod estimator;
pub mod processing;
pub mod simulation;
pub mod types;

// Re-export the core contract
pub use config::{EstimatorConfig, FilterConfig, InputConfig, PeakConfig, SmoothingConfig};
pub use estimator::{estimate_heart_rate, estimate_with_report};
pub use processing::ProcessingError;
pub use types::HeartRateReport;

// Re-export the boundary types
pub use api::{handle, ApiError, HeartRateRequest, HeartRateResponse, InputError};
