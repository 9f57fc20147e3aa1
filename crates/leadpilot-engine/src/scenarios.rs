//! Live campaign classification.

use chrono::{DateTime, Utc};
use leadpilot_core::{PerformanceMetrics, ScenarioThresholds, ValidationError};
use serde::{Deserialize, Serialize};

const SCALE_BUDGET_MULTIPLIER: f64 = 1.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    ExceedingExpectations,
    OnTrack,
    Underperforming,
    AtRisk,
    StopLoss,
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Scenario::ExceedingExpectations => "EXCEEDING_EXPECTATIONS",
            Scenario::OnTrack => "ON_TRACK",
            Scenario::Underperforming => "UNDERPERFORMING",
            Scenario::AtRisk => "AT_RISK",
            Scenario::StopLoss => "STOP_LOSS",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordRadius {
    Expand,
    Moderate,
    Tighten,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioAction {
    ScaleBudget { multiplier: f64 },
    Maintain,
    NarrowKeywords { radius: KeywordRadius },
    IncreasePressure { radius: KeywordRadius },
    TriggerRefiner,
    Pause,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub actions: Vec<ScenarioAction>,
    pub evaluated_at: DateTime<Utc>,
}

impl ScenarioOutcome {
    fn new(scenario: Scenario, actions: Vec<ScenarioAction>) -> Self {
        Self {
            scenario,
            actions,
            evaluated_at: Utc::now(),
        }
    }

    /// `true` when the landing page should be re-audited.
    #[must_use]
    pub fn requires_refiner(&self) -> bool {
        self.actions.contains(&ScenarioAction::TriggerRefiner)
    }
}

/// Classify campaign performance. The first matching rule wins.
#[must_use]
pub fn evaluate_scenario(
    metrics: &PerformanceMetrics,
    thresholds: &ScenarioThresholds,
) -> ScenarioOutcome {
    let t = thresholds;
    let cpl = metrics.effective_cpl();
    let target = t.target_cpl;
    let enough_leads = metrics.leads >= t.min_leads;

    let outcome = if metrics.spend >= t.min_spend
        && (metrics.leads == 0 || cpl >= target * t.stop_loss_cpl_multiplier)
    {
        ScenarioOutcome::new(Scenario::StopLoss, vec![ScenarioAction::Pause])
    } else if cpl <= target * (1.0 - t.exceeding_cpl_delta) && enough_leads {
        ScenarioOutcome::new(
            Scenario::ExceedingExpectations,
            vec![
                ScenarioAction::ScaleBudget {
                    multiplier: SCALE_BUDGET_MULTIPLIER,
                },
                ScenarioAction::IncreasePressure {
                    radius: KeywordRadius::Expand,
                },
            ],
        )
    } else if cpl <= target * (1.0 + t.on_track_cpl_delta) && enough_leads {
        ScenarioOutcome::new(Scenario::OnTrack, vec![ScenarioAction::Maintain])
    } else if cpl >= target * (1.0 + t.at_risk_cpl_delta) {
        // Checked before underperforming: the bands overlap.
        ScenarioOutcome::new(
            Scenario::AtRisk,
            vec![
                ScenarioAction::NarrowKeywords {
                    radius: KeywordRadius::Tighten,
                },
                ScenarioAction::TriggerRefiner,
            ],
        )
    } else if cpl >= target * (1.0 + t.underperforming_cpl_delta) || !enough_leads {
        ScenarioOutcome::new(
            Scenario::Underperforming,
            vec![
                ScenarioAction::NarrowKeywords {
                    radius: KeywordRadius::Moderate,
                },
                ScenarioAction::TriggerRefiner,
            ],
        )
    } else {
        ScenarioOutcome::new(Scenario::OnTrack, vec![ScenarioAction::Maintain])
    };

    tracing::debug!(
        spend = metrics.spend,
        leads = metrics.leads,
        cpl,
        scenario = %outcome.scenario,
        "scenario evaluated"
    );

    outcome
}

/// [`evaluate_scenario`] with the default thresholds.
#[must_use]
pub fn evaluate_scenario_default(metrics: &PerformanceMetrics) -> ScenarioOutcome {
    evaluate_scenario(metrics, &ScenarioThresholds::default())
}

/// Validate metrics before classifying them.
///
/// # Errors
///
/// Returns a [`ValidationError`] for negative or non-finite amounts and
/// out-of-range rates or scores.
pub fn try_evaluate_scenario(
    metrics: &PerformanceMetrics,
    thresholds: &ScenarioThresholds,
) -> Result<ScenarioOutcome, ValidationError> {
    metrics.validate()?;
    Ok(evaluate_scenario(metrics, thresholds))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(spend: f64, leads: u32, cpl: f64) -> ScenarioOutcome {
        evaluate_scenario_default(&PerformanceMetrics::new(spend, leads).with_cpl(cpl))
    }

    #[test]
    fn zero_leads_past_min_spend_is_stop_loss() {
        let out = classify(300.0, 0, 0.0);
        assert_eq!(out.scenario, Scenario::StopLoss);
        assert_eq!(out.actions, vec![ScenarioAction::Pause]);
    }

    #[test]
    fn runaway_cpl_past_min_spend_is_stop_loss() {
        // 120 * 1.9 = 228
        let out = classify(1000.0, 4, 230.0);
        assert_eq!(out.scenario, Scenario::StopLoss);
    }

    #[test]
    fn stop_loss_needs_min_spend() {
        let out = classify(249.0, 0, 0.0);
        assert_ne!(out.scenario, Scenario::StopLoss);
        assert_eq!(out.scenario, Scenario::Underperforming);
    }

    #[test]
    fn cheap_leads_exceed_expectations() {
        let out = classify(300.0, 10, 90.0);
        assert_eq!(out.scenario, Scenario::ExceedingExpectations);
        assert_eq!(
            out.actions,
            vec![
                ScenarioAction::ScaleBudget { multiplier: 1.1 },
                ScenarioAction::IncreasePressure {
                    radius: KeywordRadius::Expand
                },
            ]
        );
    }

    #[test]
    fn exceeding_needs_min_leads() {
        // 120 * 0.85 = 102
        assert_eq!(
            classify(200.0, 4, 101.0).scenario,
            Scenario::ExceedingExpectations
        );
        assert_eq!(classify(200.0, 3, 101.0).scenario, Scenario::Underperforming);
    }

    #[test]
    fn near_target_is_on_track() {
        let out = classify(300.0, 5, 130.0);
        assert_eq!(out.scenario, Scenario::OnTrack);
        assert_eq!(out.actions, vec![ScenarioAction::Maintain]);
        assert!(!out.requires_refiner());
    }

    #[test]
    fn stop_loss_precedes_at_risk_once_min_spend_is_reached() {
        // 260 is past both the at-risk (192) and stop-loss (228) lines.
        assert_eq!(classify(300.0, 5, 260.0).scenario, Scenario::StopLoss);
    }

    #[test]
    fn at_risk_wins_over_underperforming() {
        let out = classify(200.0, 5, 260.0);
        assert_eq!(out.scenario, Scenario::AtRisk);
        assert_eq!(
            out.actions,
            vec![
                ScenarioAction::NarrowKeywords {
                    radius: KeywordRadius::Tighten
                },
                ScenarioAction::TriggerRefiner,
            ]
        );
        assert!(out.requires_refiner());
    }

    #[test]
    fn at_risk_regardless_of_lead_count() {
        // 120 * 1.6 = 192
        assert_eq!(classify(200.0, 1, 195.0).scenario, Scenario::AtRisk);
        assert_eq!(classify(200.0, 50, 200.0).scenario, Scenario::AtRisk);
    }

    #[test]
    fn moderate_overspend_is_underperforming() {
        // between 120 * 1.35 = 162 and 192
        let out = classify(300.0, 6, 170.0);
        assert_eq!(out.scenario, Scenario::Underperforming);
        assert_eq!(
            out.actions,
            vec![
                ScenarioAction::NarrowKeywords {
                    radius: KeywordRadius::Moderate
                },
                ScenarioAction::TriggerRefiner,
            ]
        );
    }

    #[test]
    fn too_few_leads_is_underperforming() {
        assert_eq!(classify(100.0, 2, 50.0).scenario, Scenario::Underperforming);
    }

    #[test]
    fn gap_between_on_track_and_underperforming_falls_back_to_on_track() {
        // above 144 (on-track ceiling) but below 162 (underperforming floor)
        let out = classify(300.0, 6, 150.0);
        assert_eq!(out.scenario, Scenario::OnTrack);
        assert_eq!(out.actions, vec![ScenarioAction::Maintain]);
    }

    #[test]
    fn derives_cpl_when_not_reported() {
        let out = evaluate_scenario_default(&PerformanceMetrics::new(400.0, 5));
        // 400 / 5 = 80
        assert_eq!(out.scenario, Scenario::ExceedingExpectations);
    }

    #[test]
    fn custom_thresholds_shift_bands() {
        let thresholds = ScenarioThresholds {
            target_cpl: 60.0,
            ..ScenarioThresholds::default()
        };
        let metrics = PerformanceMetrics::new(200.0, 5).with_cpl(90.0);
        assert_eq!(
            evaluate_scenario(&metrics, &thresholds).scenario,
            Scenario::Underperforming
        );
    }

    #[test]
    fn try_evaluate_rejects_negative_spend() {
        let err = try_evaluate_scenario(
            &PerformanceMetrics::new(-5.0, 1),
            &ScenarioThresholds::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidMetric { field: "spend", .. }));
    }

    #[test]
    fn actions_serialize_as_tagged_objects() {
        let json = serde_json::to_value(ScenarioAction::ScaleBudget { multiplier: 1.1 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "scale_budget", "multiplier": 1.1}));
        let json = serde_json::to_value(ScenarioAction::NarrowKeywords {
            radius: KeywordRadius::Tighten,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"type": "narrow_keywords", "radius": "tighten"}));
        let json = serde_json::to_value(Scenario::AtRisk).unwrap();
        assert_eq!(json, serde_json::json!("AT_RISK"));
    }
}
