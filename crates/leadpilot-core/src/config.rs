use crate::app_config::AppConfig;
use crate::{ConfigError, OccalizerMode};

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("LEADPILOT_LOG_LEVEL", "info");
    let thresholds_path = lookup("LEADPILOT_THRESHOLDS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let raw_mode = or_default("LEADPILOT_DEFAULT_MODE", "FAIR");
    let default_mode = raw_mode
        .parse::<OccalizerMode>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "LEADPILOT_DEFAULT_MODE".to_string(),
            reason: e.to_string(),
        })?;

    Ok(AppConfig {
        log_level,
        thresholds_path,
        default_mode,
    })
}
