//! Report assembler: the full statement-to-scorecard pipeline.
//!
//! One synchronous call per analysis request over immutable inputs. The
//! caller receives either a complete `ScoreCard` (possibly containing
//! undefined entries) or a single error, never a partial mix of the two.
//! Ratios and scores are rounded to two decimal places here, at the
//! presentation boundary; every intermediate stage keeps full precision.

use serde::Serialize;

use crate::benchmark::{compare_to_benchmark, BenchmarkComparison, BenchmarkProfile};
use crate::ratios::{compute_all, RatioSet};
use crate::scoring::curves::ScoringPolicy;
use crate::scoring::overall::compute_overall;
use crate::scoring::subscores::{compute_sub_scores, SubScoreSet};
use crate::simulate::{apply_delta, SimulationDelta};
use crate::statement::aliases::AliasTable;
use crate::statement::line_items::Ledger;
use crate::statement::normalize::{normalize_statements, RawStatementFile};
use crate::trend::{build_trends, TrendRow};
use crate::types::MetricValue;
use crate::PassportResult;

/// Decimal places shown in the serialized scorecard.
const PRESENTATION_DP: u32 = 2;

/// Process-wide engine configuration, loaded once at startup and shared
/// read-only across requests. Reload happens only at process restart.
#[derive(Debug, Clone, Default, Serialize, serde::Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub aliases: AliasTable,
    #[serde(default)]
    pub policy: ScoringPolicy,
    #[serde(default)]
    pub benchmark: BenchmarkProfile,
}

impl EngineConfig {
    /// Validate all configuration tables. Failures here are fatal at
    /// process start, never per-request.
    pub fn validate(&self) -> PassportResult<()> {
        self.aliases.validate()?;
        self.policy.validate()?;
        self.benchmark.validate()?;
        Ok(())
    }
}

/// The assessment returned for one analysis request. Immutable once
/// returned; the engine never persists it.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreCard {
    pub detected_fiscal_year: String,
    pub overall_score: MetricValue,
    pub sub_scores: SubScoreSet,
    pub ratios: RatioSet,
    pub trends: Vec<TrendRow>,
    pub benchmark: Vec<BenchmarkComparison>,
}

/// Baseline and hypothetical assessments for a what-if request.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub delta: SimulationDelta,
    pub baseline: ScoreCard,
    pub simulation: ScoreCard,
}

/// Run the full pipeline on uploaded statement files.
pub fn analyze(
    files: &[RawStatementFile],
    config: &EngineConfig,
) -> PassportResult<ScoreCard> {
    let ledger = normalize_statements(files, &config.aliases)?;
    Ok(analyze_ledger(&ledger, config))
}

/// Run stages 2-6 on an already-normalized ledger.
pub fn analyze_ledger(ledger: &Ledger, config: &EngineConfig) -> ScoreCard {
    let ratios_by_year = compute_all(ledger);
    let (latest_year, _) = ledger.latest();

    // compute_all covers every ledger year, so the latest is always there.
    let latest_ratios = ratios_by_year
        .last()
        .map(|(_, ratios)| ratios.clone())
        .unwrap_or_default();

    let sub_scores = compute_sub_scores(&latest_ratios, &config.policy);
    let overall_score = compute_overall(&sub_scores, &config.policy);
    let trends = build_trends(ledger, &ratios_by_year);
    let benchmark = compare_to_benchmark(&latest_ratios, &sub_scores, &config.benchmark);

    ScoreCard {
        detected_fiscal_year: latest_year.to_string(),
        overall_score: overall_score.round_dp(PRESENTATION_DP),
        sub_scores: sub_scores.rounded(PRESENTATION_DP),
        ratios: latest_ratios.rounded(PRESENTATION_DP),
        trends: trends
            .iter()
            .map(|row| row.rounded(PRESENTATION_DP))
            .collect(),
        benchmark: benchmark
            .into_iter()
            .map(|mut c| {
                c.company_value = c.company_value.round_dp(PRESENTATION_DP);
                c.deviation = c.deviation.round_dp(PRESENTATION_DP);
                c
            })
            .collect(),
    }
}

/// Run the what-if path: baseline scorecard plus a re-scored hypothetical
/// ledger with the delta applied to the latest year. The baseline ledger
/// is copied, never mutated.
pub fn analyze_with_simulation(
    files: &[RawStatementFile],
    delta: SimulationDelta,
    config: &EngineConfig,
) -> PassportResult<SimulationReport> {
    let ledger = normalize_statements(files, &config.aliases)?;
    simulate_ledger(&ledger, delta, config)
}

/// What-if on an already-normalized ledger.
pub fn simulate_ledger(
    ledger: &Ledger,
    delta: SimulationDelta,
    config: &EngineConfig,
) -> PassportResult<SimulationReport> {
    let baseline = analyze_ledger(ledger, config);

    let (_, latest_items) = ledger.latest();
    let hypothetical_items = apply_delta(latest_items, &delta)?;
    let hypothetical = ledger.with_latest_replaced(hypothetical_items);
    let simulation = analyze_ledger(&hypothetical, config);

    Ok(SimulationReport {
        delta,
        baseline,
        simulation,
    })
}
