use clap::Args;
use serde_json::Value;

use passport_core::report;

use crate::input;

/// Statement and configuration sources shared by analysis commands.
#[derive(Args)]
pub struct StatementArgs {
    /// Path to a JSON file holding the raw statement tables
    #[arg(long)]
    pub input: Option<String>,

    /// CSV statement tabulation ("Field,2022,2023,..."); repeatable,
    /// later files override earlier ones for overlapping years
    #[arg(long)]
    pub csv: Vec<String>,

    /// Alias table override (JSON or YAML)
    #[arg(long)]
    pub aliases: Option<String>,

    /// Scoring curves and category weights override (JSON or YAML)
    #[arg(long)]
    pub policy: Option<String>,

    /// Benchmark profile override (JSON or YAML)
    #[arg(long)]
    pub benchmark: Option<String>,
}

/// Arguments for scorecard analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub statements: StatementArgs,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = input::config::load_engine_config(
        &args.statements.aliases,
        &args.statements.policy,
        &args.statements.benchmark,
    )?;
    let files = input::statements::gather(&args.statements.input, &args.statements.csv)?;

    let card = report::analyze(&files, &config)?;
    Ok(serde_json::to_value(&card)?)
}
