pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "campaign-estimator")]
#[command(about = "Estimate campaign reach, cost and payment totals")]
pub struct CliConfig {
    /// Path to the JSON estimate request
    #[arg(short, long)]
    pub request: String,

    /// Path to a TOML engine config; the built-in catalog is used otherwise
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the payment method named in the request
    #[arg(long)]
    pub payment_method: Option<String>,

    /// Override the number of days a daily budget runs
    #[arg(long)]
    pub duration_days: Option<u32>,

    /// Run the simulated settlement after estimating
    #[arg(long)]
    pub settle: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}
