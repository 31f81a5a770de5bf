//! Trend builder: metric x fiscal-year matrix across the whole ledger.
//!
//! One row per tracked metric (raw revenue and net profit, then every
//! ratio), one cell per fiscal year in ascending order. A year where the
//! metric could not be computed carries an explicit null, never an empty
//! cell that could be confused with zero.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ratios::{Ratio, RatioSet};
use crate::statement::line_items::{Ledger, LineItem};
use crate::types::{FiscalYear, MetricValue};

/// One metric's value across all fiscal years, ascending.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendRow {
    pub metric: String,
    pub cells: Vec<(FiscalYear, MetricValue)>,
}

impl TrendRow {
    pub fn get(&self, year: FiscalYear) -> MetricValue {
        self.cells
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, v)| *v)
            .unwrap_or(MetricValue::Undefined)
    }

    pub fn rounded(&self, dp: u32) -> TrendRow {
        TrendRow {
            metric: self.metric.clone(),
            cells: self
                .cells
                .iter()
                .map(|(y, v)| (*y, v.round_dp(dp)))
                .collect(),
        }
    }
}

// Serialized as `{"Metric": "...", "2022": 2.0, "2023": null}` per the
// presentation contract, so the row carries dynamic year keys.
impl Serialize for TrendRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len() + 1))?;
        map.serialize_entry("Metric", &self.metric)?;
        for (year, value) in &self.cells {
            map.serialize_entry(&year.to_string(), value)?;
        }
        map.end()
    }
}

/// Assemble trend rows from the ledger and its per-year ratio sets.
///
/// `ratios_by_year` must cover the ledger's years ascending, as produced
/// by `ratios::compute_all`.
pub fn build_trends(
    ledger: &Ledger,
    ratios_by_year: &[(FiscalYear, RatioSet)],
) -> Vec<TrendRow> {
    let mut rows = Vec::with_capacity(Ratio::ALL.len() + 2);

    rows.push(line_item_row("Revenue", LineItem::Revenue, ledger));
    rows.push(line_item_row("Net Profit", LineItem::NetIncome, ledger));

    for ratio in Ratio::ALL {
        rows.push(TrendRow {
            metric: ratio.name().to_string(),
            cells: ratios_by_year
                .iter()
                .map(|(year, ratios)| (*year, ratios.get(ratio)))
                .collect(),
        });
    }

    rows
}

fn line_item_row(metric: &str, item: LineItem, ledger: &Ledger) -> TrendRow {
    TrendRow {
        metric: metric.to_string(),
        cells: ledger
            .iter()
            .map(|(year, items)| (year, MetricValue::from(items.get(item))))
            .collect(),
    }
}
