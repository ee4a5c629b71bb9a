//! Estimator Configuration
//!
//! Every tunable the pipeline uses (cutoffs, filter order, window
//! lengths, the peak-distance factor) lives here as an
//! operator-editable TOML value with a documented default, instead of as
//! a literal scattered through the stages.
//!
//! ## Loading Order
//!
//! 1. `PULSEFRAME_CONFIG` environment variable (path to a TOML file)
//! 2. `pulseframe.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The loaded value is passed by reference into the estimator; there is
//! no process-global configuration state.

pub mod defaults;
mod validation;

pub use validation::{validate_ranges, validate_unknown_keys, ValidationWarning};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Errors loading a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config rejected: {}", .errors.join("; "))]
    Invalid { errors: Vec<String> },
}

/// Root configuration for the heart-rate estimator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimatorConfig {
    /// Bandpass filter design
    #[serde(default)]
    pub filter: FilterConfig,

    /// Savitzky-Golay and moving-average smoothing
    #[serde(default)]
    pub smoothing: SmoothingConfig,

    /// Peak detection spacing
    #[serde(default)]
    pub peaks: PeakConfig,

    /// Input handling
    #[serde(default)]
    pub input: InputConfig,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            smoothing: SmoothingConfig::default(),
            peaks: PeakConfig::default(),
            input: InputConfig::default(),
        }
    }
}

/// Bandpass design parameters. Invariant (checked per call against the
/// actual sampling rate): `0 < lowcut < highcut < fps / 2`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Low cutoff in Hz
    #[serde(default = "defaults::lowcut_hz")]
    pub lowcut_hz: f64,

    /// High cutoff in Hz
    #[serde(default = "defaults::highcut_hz")]
    pub highcut_hz: f64,

    /// Butterworth order
    #[serde(default = "defaults::filter_order")]
    pub order: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            lowcut_hz: defaults::lowcut_hz(),
            highcut_hz: defaults::highcut_hz(),
            order: defaults::filter_order(),
        }
    }
}

/// Smoothing stage parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SmoothingConfig {
    /// Savitzky-Golay window length in samples (odd)
    #[serde(default = "defaults::savgol_window")]
    pub savgol_window: usize,

    /// Savitzky-Golay polynomial degree (< window)
    #[serde(default = "defaults::savgol_degree")]
    pub savgol_degree: usize,

    /// Moving-average window length in samples
    #[serde(default = "defaults::moving_average_window")]
    pub moving_average_window: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            savgol_window: defaults::savgol_window(),
            savgol_degree: defaults::savgol_degree(),
            moving_average_window: defaults::moving_average_window(),
        }
    }
}

/// Peak detection parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeakConfig {
    /// Minimum peak spacing as a fraction of `fps` samples.
    ///
    /// The effective spacing is `round(fps × min_distance_factor)`,
    /// which bounds the fastest detectable rate at
    /// `60 / min_distance_factor` BPM (≈ 133 BPM at the default 0.45).
    #[serde(default = "defaults::min_distance_factor")]
    pub min_distance_factor: f64,
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            min_distance_factor: defaults::min_distance_factor(),
        }
    }
}

impl PeakConfig {
    /// Effective minimum peak spacing in samples for a sampling rate,
    /// never below 1.
    pub fn min_distance_samples(&self, fps: f64) -> usize {
        let d = (fps * self.min_distance_factor).round();
        if d < 1.0 {
            1
        } else {
            d as usize
        }
    }
}

/// Input-side defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputConfig {
    /// Sampling rate assumed when a request omits `fps`
    #[serde(default = "defaults::default_fps")]
    pub default_fps: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            default_fps: defaults::default_fps(),
        }
    }
}

impl EstimatorConfig {
    /// Load configuration using the standard search order:
    /// 1. `PULSEFRAME_CONFIG` environment variable
    /// 2. `./pulseframe.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A broken file falls back to the next source with a warning; an
    /// out-of-range file is rejected outright so a typo cannot silently
    /// change the physiology of the estimate.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("PULSEFRAME_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded estimator config from PULSEFRAME_CONFIG");
                        return config;
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from PULSEFRAME_CONFIG, falling back");
                    }
                }
            } else {
                warn!(path = %path, "PULSEFRAME_CONFIG points to a non-existent file, falling back");
            }
        }

        let cwd_file = Path::new("pulseframe.toml");
        if cwd_file.exists() {
            match Self::load_from_file(cwd_file) {
                Ok(config) => {
                    info!(path = %cwd_file.display(), "Loaded estimator config");
                    return config;
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./pulseframe.toml, using defaults");
                }
            }
        }

        Self::default()
    }

    /// Load and validate a specific TOML file.
    ///
    /// Unknown keys and suspicious values produce warnings (logged, not
    /// fatal); impossible values produce [`ConfigError::Invalid`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;

        for w in validate_unknown_keys(&raw) {
            warn!(field = %w.field, "{w}");
        }

        let config: Self = toml::from_str(&raw)?;

        let (errors, warnings) = validate_ranges(&config);
        for w in &warnings {
            warn!(field = %w.field, "{w}");
        }
        if !errors.is_empty() {
            return Err(ConfigError::Invalid { errors });
        }

        Ok(config)
    }
}
