//! Benchmark comparator: latest-year metrics against an industry profile.
//!
//! The profile is static reference data, loaded once at process start and
//! shared read-only across requests. Each compared metric gets a signed
//! deviation from the profile midpoint and a below/within/above
//! classification against the tolerance band. Undefined company values
//! are reported as insufficient data, never silently skipped, so the
//! caller can tell "underperforming" from "unmeasurable".

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PassportError;
use crate::ratios::{Ratio, RatioSet};
use crate::scoring::subscores::SubScoreSet;
use crate::types::{Category, MetricValue};
use crate::PassportResult;

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// Reference band for one ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatioBenchmark {
    pub ratio: Ratio,
    pub midpoint: Decimal,
    pub tolerance: Decimal,
}

/// Reference band for one category sub-score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBenchmark {
    pub category: Category,
    pub midpoint: Decimal,
    pub tolerance: Decimal,
}

/// Peer-segment reference profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkProfile {
    /// Peer segment the bands describe.
    pub segment: String,
    pub ratios: Vec<RatioBenchmark>,
    pub sub_scores: Vec<CategoryBenchmark>,
}

impl BenchmarkProfile {
    pub fn validate(&self) -> PassportResult<()> {
        if self.ratios.is_empty() && self.sub_scores.is_empty() {
            return Err(PassportError::Configuration {
                component: "benchmark profile".into(),
                reason: "profile has no reference bands".into(),
            });
        }
        for band in &self.ratios {
            if band.tolerance < Decimal::ZERO {
                return Err(PassportError::Configuration {
                    component: "benchmark profile".into(),
                    reason: format!("negative tolerance for {}", band.ratio),
                });
            }
        }
        for band in &self.sub_scores {
            if band.tolerance < Decimal::ZERO {
                return Err(PassportError::Configuration {
                    component: "benchmark profile".into(),
                    reason: format!("negative tolerance for {}", band.category),
                });
            }
        }
        Ok(())
    }
}

impl Default for BenchmarkProfile {
    /// Built-in SME manufacturing/trading segment bands.
    fn default() -> Self {
        fn ratio(ratio: Ratio, midpoint: Decimal, tolerance: Decimal) -> RatioBenchmark {
            RatioBenchmark {
                ratio,
                midpoint,
                tolerance,
            }
        }
        fn category(
            category: Category,
            midpoint: Decimal,
            tolerance: Decimal,
        ) -> CategoryBenchmark {
            CategoryBenchmark {
                category,
                midpoint,
                tolerance,
            }
        }

        BenchmarkProfile {
            segment: "SME general".to_string(),
            ratios: vec![
                ratio(Ratio::CurrentRatio, dec!(1.5), dec!(0.2)),
                ratio(Ratio::QuickRatio, dec!(1.0), dec!(0.2)),
                ratio(Ratio::DebtToEquity, dec!(1.5), dec!(0.5)),
                ratio(Ratio::NetProfitMargin, dec!(0.08), dec!(0.04)),
                ratio(Ratio::GrossMargin, dec!(0.30), dec!(0.10)),
                ratio(Ratio::ReturnOnEquity, dec!(0.15), dec!(0.05)),
                ratio(Ratio::ReturnOnAssets, dec!(0.07), dec!(0.03)),
                ratio(Ratio::InventoryTurnover, dec!(6), dec!(2)),
                ratio(Ratio::ReceivablesTurnover, dec!(8), dec!(2)),
            ],
            sub_scores: vec![
                category(Category::Liquidity, dec!(60), dec!(15)),
                category(Category::Profitability, dec!(55), dec!(15)),
                category(Category::Leverage, dec!(60), dec!(15)),
                category(Category::Efficiency, dec!(55), dec!(15)),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// Where a company metric sits relative to the reference band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkClassification {
    Below,
    Within,
    Above,
    InsufficientData,
}

/// One compared metric in the benchmark report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    pub metric: String,
    pub company_value: MetricValue,
    pub benchmark_value: Decimal,
    /// Signed deviation from the midpoint; null when unmeasurable.
    pub deviation: MetricValue,
    pub classification: BenchmarkClassification,
}

/// Compare the latest year's ratios and sub-scores against the profile.
pub fn compare_to_benchmark(
    ratios: &RatioSet,
    sub_scores: &SubScoreSet,
    profile: &BenchmarkProfile,
) -> Vec<BenchmarkComparison> {
    let mut out = Vec::with_capacity(profile.ratios.len() + profile.sub_scores.len());

    for band in &profile.ratios {
        out.push(compare_one(
            band.ratio.name().to_string(),
            ratios.get(band.ratio),
            band.midpoint,
            band.tolerance,
        ));
    }
    for band in &profile.sub_scores {
        out.push(compare_one(
            format!("{} score", band.category),
            sub_scores.get(band.category),
            band.midpoint,
            band.tolerance,
        ));
    }

    out
}

fn compare_one(
    metric: String,
    company_value: MetricValue,
    midpoint: Decimal,
    tolerance: Decimal,
) -> BenchmarkComparison {
    let (deviation, classification) = match company_value.defined() {
        Some(value) => {
            let deviation = value - midpoint;
            let classification = if deviation < -tolerance {
                BenchmarkClassification::Below
            } else if deviation > tolerance {
                BenchmarkClassification::Above
            } else {
                BenchmarkClassification::Within
            };
            (MetricValue::Defined(deviation), classification)
        }
        None => (
            MetricValue::Undefined,
            BenchmarkClassification::InsufficientData,
        ),
    };

    BenchmarkComparison {
        metric,
        company_value,
        benchmark_value: midpoint,
        deviation,
        classification,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
