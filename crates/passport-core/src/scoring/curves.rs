//! Scoring policy: curves and weights as configuration, not code.
//!
//! Each ratio gets one piecewise-linear curve: below the floor scores 0,
//! above the ceiling scores 100, linear in between, with the slope
//! reversed for lower-is-better ratios. Category weights drive the
//! overall score. Both live in a serde-loadable `ScoringPolicy` so the
//! scoring policy can change without touching aggregation logic.
//! Malformed policies are rejected at load time, never per-request.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PassportError;
use crate::ratios::Ratio;
use crate::types::{Category, Score};
use crate::PassportResult;

/// Curve orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveDirection {
    HigherIsBetter,
    LowerIsBetter,
}

/// Piecewise-linear scoring curve for one ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveSpec {
    pub ratio: Ratio,
    /// Category whose sub-score this ratio feeds.
    pub category: Category,
    /// At or below the floor: 0 for higher-is-better, 100 for lower-is-better.
    pub floor: Decimal,
    /// At or above the ceiling: 100 for higher-is-better, 0 for lower-is-better.
    pub ceiling: Decimal,
    pub direction: CurveDirection,
}

impl CurveSpec {
    /// Score a defined ratio value on the 0-100 scale.
    pub fn score(&self, value: Decimal) -> Score {
        let span = self.ceiling - self.floor;
        let fraction = match self.direction {
            CurveDirection::HigherIsBetter => (value - self.floor) / span,
            CurveDirection::LowerIsBetter => (self.ceiling - value) / span,
        };
        fraction.clamp(Decimal::ZERO, Decimal::ONE) * dec!(100)
    }
}

/// Weight of one category in the overall score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub category: Category,
    pub weight: Decimal,
}

/// The full scoring configuration: one curve per ratio, one weight per
/// category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub curves: Vec<CurveSpec>,
    pub weights: Vec<CategoryWeight>,
}

impl ScoringPolicy {
    pub fn validate(&self) -> PassportResult<()> {
        if self.curves.is_empty() {
            return Err(PassportError::Configuration {
                component: "scoring policy".into(),
                reason: "at least one scoring curve is required".into(),
            });
        }
        for curve in &self.curves {
            if curve.floor >= curve.ceiling {
                return Err(PassportError::Configuration {
                    component: "scoring policy".into(),
                    reason: format!(
                        "curve for {} has floor {} >= ceiling {}",
                        curve.ratio, curve.floor, curve.ceiling
                    ),
                });
            }
        }
        for (i, a) in self.curves.iter().enumerate() {
            if self.curves[i + 1..].iter().any(|b| b.ratio == a.ratio) {
                return Err(PassportError::Configuration {
                    component: "scoring policy".into(),
                    reason: format!("duplicate curve for {}", a.ratio),
                });
            }
        }

        if self.weights.is_empty() {
            return Err(PassportError::Configuration {
                component: "scoring policy".into(),
                reason: "category weights are required".into(),
            });
        }
        for (i, a) in self.weights.iter().enumerate() {
            if a.weight < Decimal::ZERO {
                return Err(PassportError::Configuration {
                    component: "scoring policy".into(),
                    reason: format!("negative weight for {}", a.category),
                });
            }
            if self.weights[i + 1..].iter().any(|b| b.category == a.category) {
                return Err(PassportError::Configuration {
                    component: "scoring policy".into(),
                    reason: format!("duplicate weight for {}", a.category),
                });
            }
        }
        let total: Decimal = self.weights.iter().map(|w| w.weight).sum();
        if total != Decimal::ONE {
            return Err(PassportError::Configuration {
                component: "scoring policy".into(),
                reason: format!("category weights sum to {}, expected 1", total),
            });
        }
        Ok(())
    }

    pub fn curve_for(&self, ratio: Ratio) -> Option<&CurveSpec> {
        self.curves.iter().find(|c| c.ratio == ratio)
    }

    /// Curves feeding one category, in declaration order.
    pub fn curves_in(&self, category: Category) -> impl Iterator<Item = &CurveSpec> {
        self.curves.iter().filter(move |c| c.category == category)
    }

    pub fn weight_for(&self, category: Category) -> Option<Decimal> {
        self.weights
            .iter()
            .find(|w| w.category == category)
            .map(|w| w.weight)
    }
}

impl Default for ScoringPolicy {
    /// Built-in SME scoring policy. Thresholds follow the shipped scoring
    /// rules: a current ratio of 2 or a quick ratio of 1 is full marks,
    /// debt-to-equity of 3 or more scores zero, a 10% return on assets is
    /// full marks, margins score proportionally.
    fn default() -> Self {
        fn curve(
            ratio: Ratio,
            category: Category,
            floor: Decimal,
            ceiling: Decimal,
            direction: CurveDirection,
        ) -> CurveSpec {
            CurveSpec {
                ratio,
                category,
                floor,
                ceiling,
                direction,
            }
        }
        use CurveDirection::{HigherIsBetter, LowerIsBetter};

        ScoringPolicy {
            curves: vec![
                curve(
                    Ratio::CurrentRatio,
                    Category::Liquidity,
                    Decimal::ZERO,
                    dec!(2),
                    HigherIsBetter,
                ),
                curve(
                    Ratio::QuickRatio,
                    Category::Liquidity,
                    Decimal::ZERO,
                    Decimal::ONE,
                    HigherIsBetter,
                ),
                curve(
                    Ratio::NetProfitMargin,
                    Category::Profitability,
                    Decimal::ZERO,
                    Decimal::ONE,
                    HigherIsBetter,
                ),
                curve(
                    Ratio::GrossMargin,
                    Category::Profitability,
                    Decimal::ZERO,
                    Decimal::ONE,
                    HigherIsBetter,
                ),
                curve(
                    Ratio::ReturnOnEquity,
                    Category::Profitability,
                    Decimal::ZERO,
                    dec!(0.25),
                    HigherIsBetter,
                ),
                curve(
                    Ratio::DebtToEquity,
                    Category::Leverage,
                    Decimal::ZERO,
                    dec!(3),
                    LowerIsBetter,
                ),
                curve(
                    Ratio::ReturnOnAssets,
                    Category::Efficiency,
                    Decimal::ZERO,
                    dec!(0.1),
                    HigherIsBetter,
                ),
                curve(
                    Ratio::InventoryTurnover,
                    Category::Efficiency,
                    Decimal::ZERO,
                    dec!(6),
                    HigherIsBetter,
                ),
                curve(
                    Ratio::ReceivablesTurnover,
                    Category::Efficiency,
                    Decimal::ZERO,
                    dec!(8),
                    HigherIsBetter,
                ),
            ],
            weights: Category::ALL
                .iter()
                .map(|category| CategoryWeight {
                    category: *category,
                    weight: dec!(0.25),
                })
                .collect(),
        }
    }
}
