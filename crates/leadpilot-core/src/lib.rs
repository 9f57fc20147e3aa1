//! Shared types, validation and configuration for LeadPilot.

mod app_config;
pub mod blueprint;
mod config;
pub mod metrics;
pub mod mode;
pub mod thresholds;

use thiserror::Error;

pub use app_config::AppConfig;
pub use blueprint::{BlueprintInputs, BudgetCaps, StrategicBlueprint};
pub use config::{load_app_config, load_app_config_from_env};
pub use metrics::PerformanceMetrics;
pub use mode::OccalizerMode;
pub use thresholds::{load_thresholds, parse_thresholds, ScenarioThresholds};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown occalizer mode: {0}")]
    UnknownMode(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read thresholds file {path}: {source}")]
    ThresholdsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse thresholds file: {0}")]
    ThresholdsFileParse(#[from] serde_yaml::Error),

    #[error("invalid thresholds: {0}")]
    Validation(String),
}

/// Input rejected at the engine boundary.
///
/// Distinct from domain outcomes such as a blocked page or a stop-loss
/// scenario, which are returned as data.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("blueprint field `{0}` must be non-empty")]
    EmptyBlueprintField(&'static str),

    #[error("budget cap `{field}` must be a positive finite amount, got {value}")]
    InvalidBudgetCap { field: &'static str, value: f64 },

    #[error("daily budget cap {daily} exceeds monthly cap {monthly}")]
    DailyCapExceedsMonthly { daily: f64, monthly: f64 },

    #[error("metric `{field}` must be a non-negative finite number, got {value}")]
    InvalidMetric { field: &'static str, value: f64 },

    #[error("conversion rate must be within [0, 1], got {0}")]
    ConversionRateOutOfRange(f64),

    #[error("landing page score must be within [0, 100], got {0}")]
    LandingScoreOutOfRange(u8),
}
