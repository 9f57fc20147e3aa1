//! Command handlers. Each reads its inputs, runs the engine and prints JSON
//! to stdout; logs go to stderr.

use std::path::Path;

use anyhow::Context;
use leadpilot_core::{
    AppConfig, BudgetCaps, OccalizerMode, PerformanceMetrics, ScenarioThresholds,
    StrategicBlueprint,
};
use leadpilot_engine::{Block, RefinerResult, ScenarioOutcome, ZippedPlan};
use serde::Serialize;

use crate::PlanArgs;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn load_page(path: &Path) -> anyhow::Result<Vec<Block>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read page {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid page JSON in {}", path.display()))
}

/// Blueprints are YAML; JSON documents parse too since YAML is a superset.
pub(crate) fn load_blueprint(path: &Path) -> anyhow::Result<StrategicBlueprint> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read blueprint {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("invalid blueprint in {}", path.display()))
}

/// Resolve thresholds: explicit flag, then configured path, then defaults.
pub(crate) fn resolve_thresholds(
    config: &AppConfig,
    flag: Option<&Path>,
) -> anyhow::Result<ScenarioThresholds> {
    match flag.or(config.thresholds_path.as_deref()) {
        Some(path) => Ok(leadpilot_core::load_thresholds(path)?),
        None => Ok(ScenarioThresholds::default()),
    }
}

pub(crate) fn run_occalize(mode: OccalizerMode) -> anyhow::Result<()> {
    let result = leadpilot_engine::evaluate(mode);
    tracing::info!(mode = %mode, "occalizer preset resolved");
    print_json(&result)
}

pub(crate) fn run_refine(page_path: &Path) -> anyhow::Result<()> {
    let page = load_page(page_path)?;
    let result = leadpilot_engine::run_refiner(&page);
    tracing::info!(
        page = %page_path.display(),
        score = result.score,
        blocking = result.blocking_errors.len(),
        "page audited"
    );
    print_json(&result)
}

pub(crate) fn plan(config: &AppConfig, args: &PlanArgs) -> anyhow::Result<ZippedPlan> {
    let blueprint = load_blueprint(&args.blueprint)?;
    let mode = args.mode.unwrap_or(config.default_mode);
    let caps = BudgetCaps {
        daily: args.daily_budget,
        monthly: args.monthly_budget,
    };
    let occalizer = leadpilot_engine::evaluate(mode);
    let zipped =
        leadpilot_engine::try_build_campaign_plan(&blueprint, &occalizer, &caps, &args.intent)?;
    tracing::info!(
        blueprint = %blueprint.id,
        tenant = %blueprint.tenant_id,
        mode = %mode,
        plan = %zipped.plan.name,
        "campaign plan built"
    );
    Ok(zipped)
}

pub(crate) fn run_plan(config: &AppConfig, args: &PlanArgs) -> anyhow::Result<()> {
    print_json(&plan(config, args)?)
}

pub(crate) fn scenario(
    config: &AppConfig,
    metrics: &PerformanceMetrics,
    thresholds_flag: Option<&Path>,
) -> anyhow::Result<ScenarioOutcome> {
    let thresholds = resolve_thresholds(config, thresholds_flag)?;
    let outcome = leadpilot_engine::try_evaluate_scenario(metrics, &thresholds)?;
    tracing::info!(
        scenario = %outcome.scenario,
        actions = outcome.actions.len(),
        "campaign classified"
    );
    Ok(outcome)
}

pub(crate) fn run_scenario(
    config: &AppConfig,
    metrics: &PerformanceMetrics,
    thresholds_flag: Option<&Path>,
) -> anyhow::Result<()> {
    print_json(&scenario(config, metrics, thresholds_flag)?)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LaunchReport {
    pub(crate) audit: RefinerResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) campaign: Option<ZippedPlan>,
}

/// Audit the page and plan the campaign only when nothing blocks launch.
pub(crate) fn launch(
    config: &AppConfig,
    page_path: &Path,
    args: &PlanArgs,
) -> anyhow::Result<LaunchReport> {
    let page = load_page(page_path)?;
    let audit = leadpilot_engine::run_refiner(&page);

    let campaign = if audit.is_launch_ready() {
        Some(plan(config, args)?)
    } else {
        tracing::warn!(
            page = %page_path.display(),
            score = audit.score,
            errors = ?audit.blocking_errors,
            "launch blocked by refiner"
        );
        None
    };

    Ok(LaunchReport { audit, campaign })
}

pub(crate) fn run_launch(
    config: &AppConfig,
    page_path: &Path,
    args: &PlanArgs,
) -> anyhow::Result<()> {
    print_json(&launch(config, page_path, args)?)
}
