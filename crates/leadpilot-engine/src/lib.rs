//! Campaign decision engine.
//!
//! Audits landing pages, picks a bidding posture, assembles campaign plans
//! and classifies live performance. Every evaluation is a pure function of
//! its inputs; the only shared state is the learning signal bus.

pub mod learning;
pub mod occalizer;
pub mod page;
pub mod refiner;
pub mod scenarios;
pub mod zipper;

pub use leadpilot_core::OccalizerMode;
pub use learning::{LearningLedger, LearningSignal, LearningSignalBus, ModeSummary, Subscription};
pub use occalizer::{evaluate, CplRange, OccalizerResult};
pub use page::Block;
pub use refiner::{run_refiner, CheckOutcome, RefinerCheck, RefinerResult};
pub use scenarios::{
    evaluate_scenario, evaluate_scenario_default, try_evaluate_scenario, KeywordRadius, Scenario,
    ScenarioAction, ScenarioOutcome,
};
pub use zipper::{build_campaign_plan, try_build_campaign_plan, CampaignPlan, ZippedPlan};
