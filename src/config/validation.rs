//! Config validation: unknown-key detection with "did you mean?"
//! suggestions, plus range checks separating impossible values (errors)
//! from suspicious ones (warnings).

use std::collections::HashSet;

use super::EstimatorConfig;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// The complete set of valid dotted key paths for [`EstimatorConfig`].
///
/// Maintained manually to match the struct hierarchy in `mod.rs`; any
/// new field must be added here too.
fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [filter]
        "filter",
        "filter.lowcut_hz",
        "filter.highcut_hz",
        "filter.order",
        // [smoothing]
        "smoothing",
        "smoothing.savgol_window",
        "smoothing.savgol_degree",
        "smoothing.moving_average_window",
        // [peaks]
        "peaks",
        "peaks.min_distance_factor",
        // [input]
        "input",
        "input.default_fps",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// Unknown Key Detection
// ============================================================================

/// Collect all dotted key paths present in a `toml::Value` tree.
fn collect_toml_keys(value: &toml::Value, prefix: &str, out: &mut Vec<String>) {
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            out.push(path.clone());
            if v.is_table() {
                collect_toml_keys(v, &path, out);
            }
        }
    }
}

/// Levenshtein edit distance, single-row rolling formulation.
fn edit_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            let next = (diag + cost).min(row[j] + 1).min(row[j + 1] + 1);
            diag = row[j + 1];
            row[j + 1] = next;
        }
    }
    row[b_chars.len()]
}

/// Closest known key within edit distance 3, if any.
fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (k, edit_distance(unknown, k)))
        .filter(|&(_, d)| d <= 3)
        .min_by_key(|&(_, d)| d)
        .map(|(k, _)| k.to_string())
}

/// Parse a raw TOML string and return warnings for unknown config keys.
///
/// Never fails on unknown keys: old configs keep working; the operator
/// just gets told about the typo.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors surface through serde
    };

    let known = known_config_keys();
    let mut found = Vec::new();
    collect_toml_keys(&value, "", &mut found);

    found
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| {
            let suggestion = suggest_correction(&key, &known);
            ValidationWarning {
                message: format!("Unknown config key '{key}'"),
                field: key,
                suggestion,
            }
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed config.
///
/// Returns (errors, warnings): errors are values the pipeline cannot run
/// with and must prevent loading; warnings are suspicious but workable.
pub fn validate_ranges(config: &EstimatorConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let f = &config.filter;
    if !f.lowcut_hz.is_finite() || f.lowcut_hz <= 0.0 {
        errors.push(format!(
            "filter.lowcut_hz = {} must be a positive number",
            f.lowcut_hz
        ));
    }
    if !f.highcut_hz.is_finite() || f.highcut_hz <= f.lowcut_hz {
        errors.push(format!(
            "filter.highcut_hz = {} must be above filter.lowcut_hz = {}",
            f.highcut_hz, f.lowcut_hz
        ));
    }
    if f.order == 0 {
        errors.push("filter.order must be at least 1".to_string());
    } else if f.order > 8 {
        warnings.push(ValidationWarning {
            field: "filter.order".to_string(),
            message: format!(
                "filter.order = {} is numerically fragile for short windows (typical: 2-8)",
                f.order
            ),
            suggestion: None,
        });
    }

    // Heart activity lives in roughly 0.5-5 Hz; cutoffs outside that
    // band still run but rarely make sense
    if f.lowcut_hz.is_finite() && f.lowcut_hz > 0.0 && f.lowcut_hz < 0.5 {
        warnings.push(ValidationWarning {
            field: "filter.lowcut_hz".to_string(),
            message: format!(
                "filter.lowcut_hz = {} admits sub-30 BPM rhythms (typical: 0.5-1.0 Hz)",
                f.lowcut_hz
            ),
            suggestion: None,
        });
    }
    if f.highcut_hz.is_finite() && f.highcut_hz > 5.0 {
        warnings.push(ValidationWarning {
            field: "filter.highcut_hz".to_string(),
            message: format!(
                "filter.highcut_hz = {} admits over-300 BPM rhythms (typical: 3.0-5.0 Hz)",
                f.highcut_hz
            ),
            suggestion: None,
        });
    }

    let s = &config.smoothing;
    if s.savgol_window % 2 == 0 {
        errors.push(format!(
            "smoothing.savgol_window = {} must be odd",
            s.savgol_window
        ));
    }
    if s.savgol_window <= s.savgol_degree {
        errors.push(format!(
            "smoothing.savgol_window = {} must exceed smoothing.savgol_degree = {}",
            s.savgol_window, s.savgol_degree
        ));
    }
    if s.moving_average_window == 0 {
        errors.push("smoothing.moving_average_window must be at least 1".to_string());
    }

    let p = &config.peaks;
    if !p.min_distance_factor.is_finite() || p.min_distance_factor <= 0.0 {
        errors.push(format!(
            "peaks.min_distance_factor = {} must be a positive number",
            p.min_distance_factor
        ));
    } else if p.min_distance_factor > 0.5 {
        // The factor caps the detectable rate at 60/factor BPM; above
        // 0.5 that excludes common exercise heart rates
        warnings.push(ValidationWarning {
            field: "peaks.min_distance_factor".to_string(),
            message: format!(
                "peaks.min_distance_factor = {} caps the detectable rate at {:.0} BPM",
                p.min_distance_factor,
                60.0 / p.min_distance_factor
            ),
            suggestion: None,
        });
    }

    let i = &config.input;
    if !i.default_fps.is_finite() || i.default_fps <= 0.0 {
        errors.push(format!(
            "input.default_fps = {} must be a positive number",
            i.default_fps
        ));
    } else if !(10.0..=120.0).contains(&i.default_fps) {
        warnings.push(ValidationWarning {
            field: "input.default_fps".to_string(),
            message: format!(
                "input.default_fps = {} is unusual for a camera source (typical: 10-120)",
                i.default_fps
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_distance_basics() {
        assert_eq!(edit_distance("filter", "filter"), 0);
        assert_eq!(edit_distance("fitler", "filter"), 2);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("abc", ""), 3);
    }

    #[test]
    fn test_typo_key_gets_suggestion() {
        let warnings = validate_unknown_keys(
            r#"
[filter]
locut_hz = 0.7
"#,
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("locut_hz"));
        assert_eq!(warnings[0].suggestion.as_deref(), Some("filter.lowcut_hz"));
    }

    #[test]
    fn test_valid_keys_produce_no_warnings() {
        let warnings = validate_unknown_keys(
            r#"
[filter]
lowcut_hz = 0.7
highcut_hz = 4.0
order = 4

[smoothing]
savgol_window = 9

[peaks]
min_distance_factor = 0.45

[input]
default_fps = 30.0
"#,
        );
        assert!(warnings.is_empty(), "Expected 0 warnings, got: {warnings:?}");
    }

    #[test]
    fn test_unknown_section_warns() {
        let warnings = validate_unknown_keys(
            r#"
[smoothign]
savgol_window = 9
"#,
        );
        assert!(!warnings.is_empty());
        assert!(warnings.iter().any(|w| w.field.contains("smoothign")));
    }

    #[test]
    fn test_garbage_key_gets_no_suggestion() {
        let known = known_config_keys();
        assert!(suggest_correction("totally_unrelated_nonsense_key", &known).is_none());
    }

    #[test]
    fn test_defaults_are_clean() {
        let (errors, warnings) = validate_ranges(&EstimatorConfig::default());
        assert!(errors.is_empty(), "Defaults produced errors: {errors:?}");
        assert!(
            warnings.is_empty(),
            "Defaults produced warnings: {warnings:?}"
        );
    }

    #[test]
    fn test_inverted_cutoffs_error() {
        let mut config = EstimatorConfig::default();
        config.filter.lowcut_hz = 4.0;
        config.filter.highcut_hz = 0.7;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("highcut_hz")));
    }

    #[test]
    fn test_zero_order_error() {
        let mut config = EstimatorConfig::default();
        config.filter.order = 0;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("filter.order")));
    }

    #[test]
    fn test_high_order_warns() {
        let mut config = EstimatorConfig::default();
        config.filter.order = 12;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "filter.order"));
    }

    #[test]
    fn test_even_savgol_window_error() {
        let mut config = EstimatorConfig::default();
        config.smoothing.savgol_window = 8;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("savgol_window")));
    }

    #[test]
    fn test_degree_not_below_window_error() {
        let mut config = EstimatorConfig::default();
        config.smoothing.savgol_window = 5;
        config.smoothing.savgol_degree = 5;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("savgol_degree")));
    }

    #[test]
    fn test_negative_distance_factor_error() {
        let mut config = EstimatorConfig::default();
        config.peaks.min_distance_factor = -0.1;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("min_distance_factor")));
    }

    #[test]
    fn test_large_distance_factor_warns_about_bpm_cap() {
        let mut config = EstimatorConfig::default();
        config.peaks.min_distance_factor = 0.8;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings
            .iter()
            .any(|w| w.field == "peaks.min_distance_factor" && w.message.contains("75 BPM")));
    }

    #[test]
    fn test_unusual_fps_warns() {
        let mut config = EstimatorConfig::default();
        config.input.default_fps = 500.0;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings.iter().any(|w| w.field == "input.default_fps"));
    }

    #[test]
    fn test_zero_fps_error() {
        let mut config = EstimatorConfig::default();
        config.input.default_fps = 0.0;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("default_fps")));
    }
}
