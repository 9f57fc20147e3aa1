//! Decision zipper: merges a blueprint and a bidding posture into a plan.

use leadpilot_core::{BudgetCaps, StrategicBlueprint, ValidationError};
use serde::{Deserialize, Serialize};

use crate::occalizer::{CplRange, OccalizerResult};

/// Campaign plan handed to the deployment layer.
///
/// Keywords keep their assembly order and are not deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignPlan {
    pub name: String,
    pub keywords: Vec<String>,
    pub bidding_aggressiveness: f64,
    pub expected_cpl_range: CplRange,
    pub notes: Vec<String>,
}

/// A plan plus the audit trail explaining its keyword strategy.
///
/// `reasoning` is for debugging only and is not persisted with the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZippedPlan {
    pub plan: CampaignPlan,
    pub reasoning: Vec<String>,
}

/// Assemble a campaign plan.
///
/// Inputs are assumed valid; use [`try_build_campaign_plan`] to check them
/// first. An empty `site_intent` drops the intent keyword.
#[must_use]
pub fn build_campaign_plan(
    blueprint: &StrategicBlueprint,
    occalizer: &OccalizerResult,
    caps: &BudgetCaps,
    site_intent: &str,
) -> ZippedPlan {
    let location = &blueprint.inputs.target_location;
    let goal = &blueprint.inputs.goal;

    let name = format!("{location} | {goal}").trim().to_string();

    let keywords: Vec<String> = [
        format!("{location} property"),
        format!("{goal} {location}"),
        site_intent.to_string(),
    ]
    .into_iter()
    .filter(|k| !k.is_empty())
    .collect();

    let intent_focus = if site_intent.is_empty() {
        "none specified"
    } else {
        site_intent
    };

    let notes = vec![
        format!(
            "Budget caps: {:.2} daily / {:.2} monthly",
            caps.daily, caps.monthly
        ),
        format!("Occalizer mode: {}", occalizer.mode),
        format!("Intent focus: {intent_focus}"),
    ];

    let range = occalizer.expected_cpl_range;
    let reasoning = vec![
        format!("Keyword strategy: {}", occalizer.keyword_strategy),
        format!(
            "Bidding at {:.2}x baseline targeting CPL {:.0}-{:.0}",
            occalizer.bidding_aggressiveness, range.low, range.high
        ),
    ];

    tracing::debug!(
        blueprint = %blueprint.id,
        mode = %occalizer.mode,
        keywords = keywords.len(),
        "campaign plan assembled"
    );

    ZippedPlan {
        plan: CampaignPlan {
            name,
            keywords,
            bidding_aggressiveness: occalizer.bidding_aggressiveness,
            expected_cpl_range: range,
            notes,
        },
        reasoning,
    }
}

/// Validate the blueprint and budget caps, then assemble the plan.
///
/// # Errors
///
/// Returns a [`ValidationError`] if the blueprint lacks a location or goal,
/// or the budget caps are not usable.
pub fn try_build_campaign_plan(
    blueprint: &StrategicBlueprint,
    occalizer: &OccalizerResult,
    caps: &BudgetCaps,
    site_intent: &str,
) -> Result<ZippedPlan, ValidationError> {
    blueprint.validate()?;
    caps.validate()?;
    Ok(build_campaign_plan(blueprint, occalizer, caps, site_intent))
}
