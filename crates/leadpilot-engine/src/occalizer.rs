//! Bidding posture presets.

use leadpilot_core::OccalizerMode;
use serde::{Deserialize, Serialize};

/// Expected cost-per-lead band, in account currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CplRange {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccalizerResult {
    pub mode: OccalizerMode,
    pub keyword_strategy: String,
    /// Bid multiplier; `1.0` is baseline.
    pub bidding_aggressiveness: f64,
    pub expected_cpl_range: CplRange,
    pub constraints: Vec<String>,
}

struct Preset {
    strategy: &'static str,
    aggressiveness: f64,
    cpl_low: f64,
    cpl_high: f64,
    constraints: &'static [&'static str],
}

fn preset(mode: OccalizerMode) -> Preset {
    match mode {
        OccalizerMode::Top => Preset {
            strategy: "Exact-match, high-intent keyword focus",
            aggressiveness: 0.70,
            cpl_low: 85.0,
            cpl_high: 140.0,
            constraints: &["limit_broad_match", "cap_keyword_radius", "focus_on_intent"],
        },
        OccalizerMode::Fair => Preset {
            strategy: "Balanced intent with controlled expansion",
            aggressiveness: 1.00,
            cpl_low: 70.0,
            cpl_high: 175.0,
            constraints: &["allow_phrase_match", "monitor_search_terms"],
        },
        OccalizerMode::Risky => Preset {
            strategy: "Market pressure with broad reach",
            aggressiveness: 1.35,
            cpl_low: 55.0,
            cpl_high: 240.0,
            constraints: &["expand_keyword_radius", "accept_cpl_variance"],
        },
    }
}

/// Resolve the preset for a bidding posture.
#[must_use]
pub fn evaluate(mode: OccalizerMode) -> OccalizerResult {
    let p = preset(mode);
    OccalizerResult {
        mode,
        keyword_strategy: p.strategy.to_string(),
        bidding_aggressiveness: p.aggressiveness,
        expected_cpl_range: CplRange {
            low: p.cpl_low,
            high: p.cpl_high,
        },
        constraints: p.constraints.iter().map(|c| (*c).to_string()).collect(),
    }
}
