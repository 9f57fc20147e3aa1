mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leadpilot_core::OccalizerMode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "leadpilot")]
#[command(about = "Landing page audits and campaign decisions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the preset for a bidding posture
    Occalize {
        /// TOP, FAIR or RISKY; defaults to `LEADPILOT_DEFAULT_MODE`
        #[arg(long)]
        mode: Option<OccalizerMode>,
    },
    /// Audit a page's blocks (JSON array) for lead-capture quality
    Refine {
        #[arg(long)]
        page: PathBuf,
    },
    /// Assemble a campaign plan from a blueprint (YAML or JSON)
    Plan {
        #[command(flatten)]
        args: PlanArgs,
    },
    /// Classify live campaign performance
    Scenario {
        #[arg(long)]
        spend: f64,
        #[arg(long)]
        leads: u32,
        /// Reported cost per lead; derived from spend / leads when omitted
        #[arg(long)]
        cpl: Option<f64>,
        #[arg(long)]
        conversion_rate: Option<f64>,
        #[arg(long)]
        landing_page_score: Option<u8>,
        /// Thresholds YAML; overrides `LEADPILOT_THRESHOLDS_PATH`
        #[arg(long)]
        thresholds: Option<PathBuf>,
    },
    /// Audit the page, then plan the campaign only if nothing blocks launch
    Launch {
        #[arg(long)]
        page: PathBuf,
        #[command(flatten)]
        args: PlanArgs,
    },
}

#[derive(Debug, clap::Args)]
struct PlanArgs {
    #[arg(long)]
    blueprint: PathBuf,
    #[arg(long)]
    mode: Option<OccalizerMode>,
    #[arg(long)]
    daily_budget: f64,
    #[arg(long)]
    monthly_budget: f64,
    /// Site intent keyword, e.g. "buy apartment"
    #[arg(long, default_value = "")]
    intent: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = leadpilot_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Occalize { mode } => commands::run_occalize(mode.unwrap_or(config.default_mode)),
        Commands::Refine { page } => commands::run_refine(&page),
        Commands::Plan { args } => commands::run_plan(&config, &args),
        Commands::Scenario {
            spend,
            leads,
            cpl,
            conversion_rate,
            landing_page_score,
            thresholds,
        } => {
            let metrics = leadpilot_core::PerformanceMetrics {
                spend,
                leads,
                cpl,
                conversion_rate,
                landing_page_score,
            };
            commands::run_scenario(&config, &metrics, thresholds.as_deref())
        }
        Commands::Launch { page, args } => commands::run_launch(&config, &page, &args),
    }
}
