//! What-If simulator: perturb the latest year and re-score.
//!
//! The simulator owns the hypothetical copy exclusively; the stored
//! ledger is never touched. A delta referencing a line item the baseline
//! year does not report fails that simulation request only. Applying the
//! same delta to the same baseline always produces the same result.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PassportError;
use crate::statement::line_items::{LineItem, LineItemSet};
use crate::PassportResult;

/// How one line item changes in the hypothetical case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adjustment {
    /// Percentage change: +10 grows the item by 10%, -25 shrinks it.
    RelativePercent(Decimal),
    /// Additive change in statement currency: a repayment is negative.
    Absolute(Decimal),
}

impl Adjustment {
    fn apply(&self, value: Decimal) -> Decimal {
        match self {
            Adjustment::RelativePercent(pct) => value * (Decimal::ONE + pct / dec!(100)),
            Adjustment::Absolute(amount) => value + amount,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Adjustment::RelativePercent(pct) => pct.is_zero(),
            Adjustment::Absolute(amount) => amount.is_zero(),
        }
    }
}

/// One perturbed line item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItemAdjustment {
    pub item: LineItem,
    pub change: Adjustment,
}

/// User-specified perturbation of the latest fiscal year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimulationDelta {
    pub adjustments: Vec<LineItemAdjustment>,
}

impl SimulationDelta {
    /// True when applying the delta cannot change any value.
    pub fn is_identity(&self) -> bool {
        self.adjustments.iter().all(|a| a.change.is_zero())
    }
}

/// Apply the delta to a copy of the baseline year's line items.
///
/// Every referenced item must be present in the baseline: perturbing a
/// value the statement never reported would manufacture data.
pub fn apply_delta(
    baseline: &LineItemSet,
    delta: &SimulationDelta,
) -> PassportResult<LineItemSet> {
    let mut hypothetical = baseline.clone();
    for adjustment in &delta.adjustments {
        let Some(current) = hypothetical.get(adjustment.item) else {
            return Err(PassportError::SimulationInput {
                item: adjustment.item.to_string(),
                reason: "line item is not reported in the baseline year".into(),
            });
        };
        hypothetical.set(adjustment.item, adjustment.change.apply(current));
    }
    Ok(hypothetical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn baseline() -> LineItemSet {
        [
            (LineItem::Revenue, dec!(500)),
            (LineItem::NetIncome, dec!(50)),
            (LineItem::TotalDebt, dec!(200)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_relative_percent_growth() {
        let delta = SimulationDelta {
            adjustments: vec![LineItemAdjustment {
                item: LineItem::Revenue,
                change: Adjustment::RelativePercent(dec!(10)),
            }],
        };
        let hypothetical = apply_delta(&baseline(), &delta).unwrap();
        assert_eq!(hypothetical.get(LineItem::Revenue), Some(dec!(550.0)));
    }

    #[test]
    fn test_absolute_repayment_is_additive() {
        let delta = SimulationDelta {
            adjustments: vec![LineItemAdjustment {
                item: LineItem::TotalDebt,
                change: Adjustment::Absolute(dec!(-50)),
            }],
        };
        let hypothetical = apply_delta(&baseline(), &delta).unwrap();
        assert_eq!(hypothetical.get(LineItem::TotalDebt), Some(dec!(150)));
    }

    #[test]
    fn test_baseline_is_never_mutated() {
        let base = baseline();
        let delta = SimulationDelta {
            adjustments: vec![LineItemAdjustment {
                item: LineItem::Revenue,
                change: Adjustment::RelativePercent(dec!(50)),
            }],
        };
        let _hypothetical = apply_delta(&base, &delta).unwrap();
        assert_eq!(base.get(LineItem::Revenue), Some(dec!(500)));
    }

    #[test]
    fn test_delta_is_deterministic() {
        let base = baseline();
        let delta = SimulationDelta {
            adjustments: vec![LineItemAdjustment {
                item: LineItem::NetIncome,
                change: Adjustment::RelativePercent(dec!(-12.5)),
            }],
        };
        let first = apply_delta(&base, &delta).unwrap();
        let second = apply_delta(&base, &delta).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_item_fails_the_simulation_only() {
        let delta = SimulationDelta {
            adjustments: vec![LineItemAdjustment {
                item: LineItem::Inventory,
                change: Adjustment::RelativePercent(dec!(10)),
            }],
        };
        let err = apply_delta(&baseline(), &delta).unwrap_err();
        match err {
            PassportError::SimulationInput { item, .. } => assert_eq!(item, "inventory"),
            other => panic!("expected SimulationInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_magnitude_delta_is_identity() {
        let delta = SimulationDelta {
            adjustments: vec![
                LineItemAdjustment {
                    item: LineItem::Revenue,
                    change: Adjustment::RelativePercent(Decimal::ZERO),
                },
                LineItemAdjustment {
                    item: LineItem::TotalDebt,
                    change: Adjustment::Absolute(Decimal::ZERO),
                },
            ],
        };
        assert!(delta.is_identity());
        let hypothetical = apply_delta(&baseline(), &delta).unwrap();
        assert_eq!(hypothetical, baseline());
    }

    #[test]
    fn test_adjustments_apply_in_order() {
        let delta = SimulationDelta {
            adjustments: vec![
                LineItemAdjustment {
                    item: LineItem::Revenue,
                    change: Adjustment::Absolute(dec!(100)),
                },
                LineItemAdjustment {
                    item: LineItem::Revenue,
                    change: Adjustment::RelativePercent(dec!(10)),
                },
            ],
        };
        // (500 + 100) * 1.1 = 660
        let hypothetical = apply_delta(&baseline(), &delta).unwrap();
        assert_eq!(hypothetical.get(LineItem::Revenue), Some(dec!(660.0)));
    }
}
