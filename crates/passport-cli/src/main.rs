mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::analyze::AnalyzeArgs;
use commands::simulate::SimulateArgs;

/// Financial statement health scoring
#[derive(Parser)]
#[command(
    name = "finpass",
    version,
    about = "Financial statement health scoring with decimal precision",
    long_about = "Turns uploaded financial statement tables into a Financial \
                  Passport scorecard: per-year ratios, category sub-scores, an \
                  overall 0-100 score, a multi-year trend table, and a peer \
                  benchmark comparison. A what-if mode re-scores a hypothetical \
                  case without touching the baseline."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze uploaded statements into a scorecard
    Analyze(AnalyzeArgs),
    /// Re-run scoring on a perturbed copy of the latest year
    Simulate(SimulateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::analyze::run_analyze(args),
        Commands::Simulate(args) => commands::simulate::run_simulate(args),
        Commands::Version => {
            println!("finpass {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
