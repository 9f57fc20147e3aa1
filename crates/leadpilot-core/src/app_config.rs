use std::path::PathBuf;

use crate::OccalizerMode;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Optional YAML file overriding the default scenario thresholds.
    pub thresholds_path: Option<PathBuf>,
    /// Bidding posture used when a command does not name one.
    pub default_mode: OccalizerMode,
}
