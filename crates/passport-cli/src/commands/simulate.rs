use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use passport_core::report;
use passport_core::simulate::{Adjustment, LineItemAdjustment, SimulationDelta};
use passport_core::statement::LineItem;

use crate::commands::analyze::StatementArgs;
use crate::input;

/// Arguments for what-if simulation
#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub statements: StatementArgs,

    /// Path to a delta file (JSON or YAML)
    #[arg(long)]
    pub delta: Option<String>,

    /// Relative change, e.g. --relative revenue=10 for +10%
    #[arg(long, value_name = "ITEM=PCT")]
    pub relative: Vec<String>,

    /// Absolute change in statement currency, e.g. --absolute total_debt=-50000
    #[arg(long, value_name = "ITEM=AMOUNT")]
    pub absolute: Vec<String>,
}

pub fn run_simulate(args: SimulateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = input::config::load_engine_config(
        &args.statements.aliases,
        &args.statements.policy,
        &args.statements.benchmark,
    )?;
    let files = input::statements::gather(&args.statements.input, &args.statements.csv)?;

    let mut delta: SimulationDelta = match &args.delta {
        Some(path) => input::config::read_config(path)?,
        None => SimulationDelta::default(),
    };
    for spec in &args.relative {
        delta.adjustments.push(parse_adjustment(spec, true)?);
    }
    for spec in &args.absolute {
        delta.adjustments.push(parse_adjustment(spec, false)?);
    }
    if delta.adjustments.is_empty() {
        return Err("no adjustments given (use --delta, --relative, or --absolute)".into());
    }

    let simulation = report::analyze_with_simulation(&files, delta, &config)?;
    Ok(serde_json::to_value(&simulation)?)
}

fn parse_adjustment(
    spec: &str,
    relative: bool,
) -> Result<LineItemAdjustment, Box<dyn std::error::Error>> {
    let (key, value) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected ITEM=VALUE, got '{}'", spec))?;
    let item = LineItem::from_key(key.trim())
        .ok_or_else(|| format!("unknown line item '{}'", key.trim()))?;
    let amount: Decimal = value
        .trim()
        .parse()
        .map_err(|e| format!("bad amount in '{}': {}", spec, e))?;

    let change = if relative {
        Adjustment::RelativePercent(amount)
    } else {
        Adjustment::Absolute(amount)
    };
    Ok(LineItemAdjustment { item, change })
}
