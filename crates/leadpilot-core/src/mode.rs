use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Bidding posture chosen for a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OccalizerMode {
    Top,
    Fair,
    Risky,
}

impl OccalizerMode {
    pub const ALL: [OccalizerMode; 3] = [
        OccalizerMode::Top,
        OccalizerMode::Fair,
        OccalizerMode::Risky,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OccalizerMode::Top => "TOP",
            OccalizerMode::Fair => "FAIR",
            OccalizerMode::Risky => "RISKY",
        }
    }
}

impl std::fmt::Display for OccalizerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OccalizerMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TOP" => Ok(OccalizerMode::Top),
            "FAIR" => Ok(OccalizerMode::Fair),
            "RISKY" => Ok(OccalizerMode::Risky),
            _ => Err(CoreError::UnknownMode(s.to_string())),
        }
    }
}
