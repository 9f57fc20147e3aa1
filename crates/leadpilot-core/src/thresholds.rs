use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Cut-offs used to classify campaign performance.
///
/// Delta fields are fractions of `target_cpl`. Any field omitted from a
/// thresholds file keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioThresholds {
    pub target_cpl: f64,
    pub exceeding_cpl_delta: f64,
    pub on_track_cpl_delta: f64,
    pub underperforming_cpl_delta: f64,
    pub at_risk_cpl_delta: f64,
    pub stop_loss_cpl_multiplier: f64,
    pub min_leads: u32,
    pub min_spend: f64,
}

impl Default for ScenarioThresholds {
    fn default() -> Self {
        Self {
            target_cpl: 120.0,
            exceeding_cpl_delta: 0.15,
            on_track_cpl_delta: 0.20,
            underperforming_cpl_delta: 0.35,
            at_risk_cpl_delta: 0.60,
            stop_loss_cpl_multiplier: 1.9,
            min_leads: 4,
            min_spend: 250.0,
        }
    }
}

/// Load and validate scenario thresholds from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_thresholds(path: &Path) -> Result<ScenarioThresholds, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ThresholdsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_thresholds(&content)
}

/// Parse and validate scenario thresholds from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_thresholds(content: &str) -> Result<ScenarioThresholds, ConfigError> {
    let thresholds: ScenarioThresholds = serde_yaml::from_str(content)?;
    validate_thresholds(&thresholds)?;
    Ok(thresholds)
}

fn validate_thresholds(t: &ScenarioThresholds) -> Result<(), ConfigError> {
    if !t.target_cpl.is_finite() || t.target_cpl <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "target_cpl must be positive, got {}",
            t.target_cpl
        )));
    }

    for (name, delta) in [
        ("exceeding_cpl_delta", t.exceeding_cpl_delta),
        ("on_track_cpl_delta", t.on_track_cpl_delta),
        ("underperforming_cpl_delta", t.underperforming_cpl_delta),
        ("at_risk_cpl_delta", t.at_risk_cpl_delta),
    ] {
        if !(0.0..1.0).contains(&delta) {
            return Err(ConfigError::Validation(format!(
                "{name} must be within [0, 1), got {delta}"
            )));
        }
    }

    if t.on_track_cpl_delta > t.underperforming_cpl_delta
        || t.underperforming_cpl_delta > t.at_risk_cpl_delta
    {
        return Err(ConfigError::Validation(
            "deltas must satisfy on_track <= underperforming <= at_risk".to_string(),
        ));
    }

    if !t.stop_loss_cpl_multiplier.is_finite() || t.stop_loss_cpl_multiplier <= 1.0 {
        return Err(ConfigError::Validation(format!(
            "stop_loss_cpl_multiplier must be greater than 1, got {}",
            t.stop_loss_cpl_multiplier
        )));
    }

    if !t.min_spend.is_finite() || t.min_spend < 0.0 {
        return Err(ConfigError::Validation(format!(
            "min_spend must be non-negative, got {}",
            t.min_spend
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_thresholds(&ScenarioThresholds::default()).is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let t = parse_thresholds("target_cpl: 90\nmin_leads: 6\n").unwrap();
        assert!((t.target_cpl - 90.0).abs() < f64::EPSILON);
        assert_eq!(t.min_leads, 6);
        assert!((t.stop_loss_cpl_multiplier - 1.9).abs() < f64::EPSILON);
        assert!((t.min_spend - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_field_is_a_parse_error() {
        let err = parse_thresholds("target_cpa: 90\n").unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdsFileParse(_)));
    }

    #[test]
    fn rejects_non_positive_target() {
        let err = parse_thresholds("target_cpl: 0\n").unwrap_err();
        assert!(err.to_string().contains("target_cpl must be positive"));
    }

    #[test]
    fn rejects_out_of_order_deltas() {
        let err = parse_thresholds("underperforming_cpl_delta: 0.7\n").unwrap_err();
        assert!(err.to_string().contains("on_track <= underperforming <= at_risk"));
    }

    #[test]
    fn rejects_stop_loss_at_or_below_target() {
        let err = parse_thresholds("stop_loss_cpl_multiplier: 1.0\n").unwrap_err();
        assert!(err.to_string().contains("stop_loss_cpl_multiplier"));
    }

    #[test]
    fn shipped_thresholds_file_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/thresholds.yaml");
        let t = load_thresholds(&path).unwrap();
        assert_eq!(t, ScenarioThresholds::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_thresholds(Path::new("/nonexistent/thresholds.yaml")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ThresholdsFileIo { ref path, .. } if path == "/nonexistent/thresholds.yaml"
        ));
    }
}
