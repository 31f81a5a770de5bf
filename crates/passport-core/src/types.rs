use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Never as percentages.
pub type Rate = Decimal;

/// Scores on the 0-100 scale.
pub type Score = Decimal;

/// One fiscal year, identified by its detected calendar year.
///
/// Ordering is numeric, so ledgers sort ascending and the latest year is
/// simply the maximum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct FiscalYear(pub i32);

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A metric that may not be computable from the available data.
///
/// `Undefined` is a value, not an error: a missing line item or a zero
/// denominator marks the single metric undefined and the rest of the
/// analysis carries on. Serializes as a JSON number or null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Defined(Decimal),
    Undefined,
}

impl MetricValue {
    pub fn is_defined(&self) -> bool {
        matches!(self, MetricValue::Defined(_))
    }

    /// The inner value, if defined.
    pub fn defined(&self) -> Option<Decimal> {
        match self {
            MetricValue::Defined(v) => Some(*v),
            MetricValue::Undefined => None,
        }
    }

    /// Rounded copy for presentation. Undefined stays undefined.
    pub fn round_dp(&self, dp: u32) -> MetricValue {
        match self {
            MetricValue::Defined(v) => MetricValue::Defined(v.round_dp(dp)),
            MetricValue::Undefined => MetricValue::Undefined,
        }
    }
}

impl From<Option<Decimal>> for MetricValue {
    fn from(opt: Option<Decimal>) -> Self {
        match opt {
            Some(v) => MetricValue::Defined(v),
            None => MetricValue::Undefined,
        }
    }
}

/// Ratio categories summarized into sub-scores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Category {
    Liquidity,
    Profitability,
    Leverage,
    Efficiency,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Liquidity,
        Category::Profitability,
        Category::Leverage,
        Category::Efficiency,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Liquidity => "Liquidity",
            Category::Profitability => "Profitability",
            Category::Leverage => "Leverage",
            Category::Efficiency => "Efficiency",
        };
        write!(f, "{}", s)
    }
}
