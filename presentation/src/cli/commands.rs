//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for council results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Every round's arguments, final votes and the verdict
    Full,
    /// Verdict, vote breakdown and key considerations
    Summary,
    /// The complete result as JSON
    Json,
    /// A Markdown decision record
    Adr,
}

impl From<OutputFormat> for council_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => council_domain::OutputFormat::Full,
            OutputFormat::Summary => council_domain::OutputFormat::Summary,
            OutputFormat::Json => council_domain::OutputFormat::Json,
            OutputFormat::Adr => council_domain::OutputFormat::Adr,
        }
    }
}

/// CLI arguments for council
#[derive(Parser, Debug)]
#[command(name = "council")]
#[command(author, version, about = "Agent council - perspective agents debate a decision and vote")]
#[command(long_about = r#"
Council runs a structured three-round debate between perspective agents
(cost, security, performance, integration, alternatives, or custom ones)
and turns their final positions into a recommendation.

The debate has three rounds:
1. Analyze: every agent analyzes the topic independently, in parallel
2. Rebut: agents respond one after another, citing each other by @agent_id
3. Synthesize: every agent states a final position, which is its vote

Every event is recorded to a JSONL manifest that can be replayed later.

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>     Explicit config file
3. ./council.toml      Project-level config
4. ~/.config/council/config.toml   Global config

Example:
  council "Migrate the billing service to Postgres"
  council -p security -p cost --background docs/billing.md "Adopt VendorX for auth"
  council --output adr --adr-out docs/adr/0012.md "Move CI to self-hosted runners"
  council --replay COUNCIL-20260101T120000-1a2b3c4d
"#)]
pub struct Cli {
    /// The decision to debate (not required with --replay or --show-config)
    pub topic: Option<String>,

    /// Perspectives to seat on the council (can be specified multiple times)
    #[arg(short = 'p', long = "perspective", value_name = "NAME")]
    pub perspectives: Vec<String>,

    /// Background document seeded into the evidence pool (repeatable)
    #[arg(long = "background", value_name = "FILE")]
    pub background: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Also write the decision record to this file
    #[arg(long, value_name = "PATH")]
    pub adr_out: Option<PathBuf>,

    /// Directory for JSONL manifests (overrides config)
    #[arg(long, value_name = "DIR")]
    pub manifest_dir: Option<PathBuf>,

    /// Use scripted agents instead of the reasoning provider
    #[arg(long)]
    pub dry_run: bool,

    /// Print the recorded timeline of a past council and exit
    #[arg(long, value_name = "COUNCIL_ID", conflicts_with = "topic")]
    pub replay: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
