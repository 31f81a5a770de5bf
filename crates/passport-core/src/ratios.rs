//! Ratio calculator: the fixed, versioned ratio set per fiscal year.
//!
//! Policy: a missing canonical key or a zero denominator marks that one
//! ratio `Undefined` for that year. A single missing line item never
//! aborts the analysis, and nothing is silently substituted with zero.
//! All arithmetic uses `rust_decimal::Decimal`. No `f64`.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::statement::line_items::{Ledger, LineItem, LineItemSet};
use crate::types::{FiscalYear, MetricValue};

/// The fixed ratio set, version 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Ratio {
    #[serde(rename = "Current Ratio")]
    CurrentRatio,
    #[serde(rename = "Quick Ratio")]
    QuickRatio,
    #[serde(rename = "Debt to Equity")]
    DebtToEquity,
    #[serde(rename = "Net Profit Margin")]
    NetProfitMargin,
    #[serde(rename = "Gross Margin")]
    GrossMargin,
    #[serde(rename = "Return on Equity")]
    ReturnOnEquity,
    #[serde(rename = "Return on Assets")]
    ReturnOnAssets,
    #[serde(rename = "Inventory Turnover")]
    InventoryTurnover,
    #[serde(rename = "Receivables Turnover")]
    ReceivablesTurnover,
}

impl Ratio {
    pub const ALL: [Ratio; 9] = [
        Ratio::CurrentRatio,
        Ratio::QuickRatio,
        Ratio::DebtToEquity,
        Ratio::NetProfitMargin,
        Ratio::GrossMargin,
        Ratio::ReturnOnEquity,
        Ratio::ReturnOnAssets,
        Ratio::InventoryTurnover,
        Ratio::ReceivablesTurnover,
    ];

    /// Presentation name, matching the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            Ratio::CurrentRatio => "Current Ratio",
            Ratio::QuickRatio => "Quick Ratio",
            Ratio::DebtToEquity => "Debt to Equity",
            Ratio::NetProfitMargin => "Net Profit Margin",
            Ratio::GrossMargin => "Gross Margin",
            Ratio::ReturnOnEquity => "Return on Equity",
            Ratio::ReturnOnAssets => "Return on Assets",
            Ratio::InventoryTurnover => "Inventory Turnover",
            Ratio::ReceivablesTurnover => "Receivables Turnover",
        }
    }
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// All ratios for one fiscal year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatioSet {
    values: BTreeMap<Ratio, MetricValue>,
}

impl RatioSet {
    pub fn get(&self, ratio: Ratio) -> MetricValue {
        self.values
            .get(&ratio)
            .copied()
            .unwrap_or(MetricValue::Undefined)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ratio, MetricValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Presentation copy with every defined value rounded.
    pub fn rounded(&self, dp: u32) -> RatioSet {
        RatioSet {
            values: self
                .values
                .iter()
                .map(|(k, v)| (*k, v.round_dp(dp)))
                .collect(),
        }
    }
}

impl FromIterator<(Ratio, MetricValue)> for RatioSet {
    fn from_iter<T: IntoIterator<Item = (Ratio, MetricValue)>>(iter: T) -> Self {
        RatioSet {
            values: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// Compute one ratio from a year's line items.
pub fn compute_ratio(ratio: Ratio, items: &LineItemSet) -> MetricValue {
    let get = |item| items.get(item);
    match ratio {
        Ratio::CurrentRatio => divide(
            get(LineItem::CurrentAssets),
            get(LineItem::CurrentLiabilities),
        ),
        Ratio::QuickRatio => divide(
            subtract(get(LineItem::CurrentAssets), get(LineItem::Inventory)),
            get(LineItem::CurrentLiabilities),
        ),
        Ratio::DebtToEquity => divide(get(LineItem::TotalDebt), get(LineItem::Equity)),
        Ratio::NetProfitMargin => divide(get(LineItem::NetIncome), get(LineItem::Revenue)),
        Ratio::GrossMargin => divide(
            subtract(get(LineItem::Revenue), get(LineItem::Cogs)),
            get(LineItem::Revenue),
        ),
        Ratio::ReturnOnEquity => divide(get(LineItem::NetIncome), get(LineItem::Equity)),
        Ratio::ReturnOnAssets => divide(get(LineItem::NetIncome), items.total_assets()),
        Ratio::InventoryTurnover => divide(get(LineItem::Cogs), get(LineItem::Inventory)),
        Ratio::ReceivablesTurnover => {
            divide(get(LineItem::Revenue), get(LineItem::Receivables))
        }
    }
}

/// Compute the full ratio set for one fiscal year.
pub fn compute_ratio_set(items: &LineItemSet) -> RatioSet {
    Ratio::ALL
        .iter()
        .map(|ratio| (*ratio, compute_ratio(*ratio, items)))
        .collect()
}

/// Compute ratio sets for every year in the ledger, ascending.
pub fn compute_all(ledger: &Ledger) -> Vec<(FiscalYear, RatioSet)> {
    ledger
        .iter()
        .map(|(year, items)| (year, compute_ratio_set(items)))
        .collect()
}

/// Division with undefined-as-value semantics: a missing operand or a
/// zero denominator yields `Undefined`, never NaN, infinity, or zero.
fn divide(numerator: Option<Decimal>, denominator: Option<Decimal>) -> MetricValue {
    match (numerator, denominator) {
        (Some(n), Some(d)) if !d.is_zero() => MetricValue::Defined(n / d),
        _ => MetricValue::Undefined,
    }
}

fn subtract(left: Option<Decimal>, right: Option<Decimal>) -> Option<Decimal> {
    match (left, right) {
        (Some(l), Some(r)) => Some(l - r),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
