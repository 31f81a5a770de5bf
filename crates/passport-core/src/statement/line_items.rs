//! Canonical line items and the multi-year ledger.
//!
//! A `LineItemSet` holds one fiscal year's normalized statement values.
//! Missing keys stay missing: "not reported" is distinct from "reported
//! as zero", and downstream ratio computation treats the two differently.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PassportError;
use crate::types::{FiscalYear, Money};
use crate::PassportResult;

/// Canonical financial statement field, independent of the source
/// document's original label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LineItem {
    CurrentAssets,
    NonCurrentAssets,
    TotalAssets,
    CurrentLiabilities,
    TotalDebt,
    Equity,
    Revenue,
    NetIncome,
    Cogs,
    Inventory,
    Receivables,
    Cash,
}

impl LineItem {
    pub const ALL: [LineItem; 12] = [
        LineItem::CurrentAssets,
        LineItem::NonCurrentAssets,
        LineItem::TotalAssets,
        LineItem::CurrentLiabilities,
        LineItem::TotalDebt,
        LineItem::Equity,
        LineItem::Revenue,
        LineItem::NetIncome,
        LineItem::Cogs,
        LineItem::Inventory,
        LineItem::Receivables,
        LineItem::Cash,
    ];

    /// Canonical snake_case key, matching the serde representation.
    pub fn key(&self) -> &'static str {
        match self {
            LineItem::CurrentAssets => "current_assets",
            LineItem::NonCurrentAssets => "non_current_assets",
            LineItem::TotalAssets => "total_assets",
            LineItem::CurrentLiabilities => "current_liabilities",
            LineItem::TotalDebt => "total_debt",
            LineItem::Equity => "equity",
            LineItem::Revenue => "revenue",
            LineItem::NetIncome => "net_income",
            LineItem::Cogs => "cogs",
            LineItem::Inventory => "inventory",
            LineItem::Receivables => "receivables",
            LineItem::Cash => "cash",
        }
    }

    pub fn from_key(key: &str) -> Option<LineItem> {
        LineItem::ALL.iter().copied().find(|i| i.key() == key)
    }
}

impl std::fmt::Display for LineItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One fiscal year's canonical line items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemSet {
    items: BTreeMap<LineItem, Money>,
}

impl LineItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, item: LineItem) -> Option<Money> {
        self.items.get(&item).copied()
    }

    pub fn contains(&self, item: LineItem) -> bool {
        self.items.contains_key(&item)
    }

    /// Set the item's value, replacing any prior value.
    pub fn set(&mut self, item: LineItem, value: Money) {
        self.items.insert(item, value);
    }

    /// Add to the item's value, starting from zero if absent. Used for
    /// keys assembled from several statement rows (borrowings, COGS
    /// components).
    pub fn accumulate(&mut self, item: LineItem, value: Money) {
        *self.items.entry(item).or_insert(Decimal::ZERO) += value;
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LineItem, Money)> + '_ {
        self.items.iter().map(|(k, v)| (*k, *v))
    }

    /// Total assets: the reported figure when present, otherwise derived
    /// from current plus non-current assets when both are reported.
    pub fn total_assets(&self) -> Option<Money> {
        if let Some(total) = self.get(LineItem::TotalAssets) {
            return Some(total);
        }
        match (
            self.get(LineItem::CurrentAssets),
            self.get(LineItem::NonCurrentAssets),
        ) {
            (Some(current), Some(non_current)) => Some(current + non_current),
            _ => None,
        }
    }
}

impl FromIterator<(LineItem, Money)> for LineItemSet {
    fn from_iter<T: IntoIterator<Item = (LineItem, Money)>>(iter: T) -> Self {
        LineItemSet {
            items: iter.into_iter().collect(),
        }
    }
}

/// Ordered multi-year ledger for one company.
///
/// Invariant: fiscal years are unique and sorted ascending, and at least
/// one year is present. Construction fails otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    years: Vec<(FiscalYear, LineItemSet)>,
}

impl Ledger {
    /// Build a ledger from (year, items) pairs in any order.
    pub fn from_pairs(pairs: Vec<(FiscalYear, LineItemSet)>) -> PassportResult<Ledger> {
        let mut years: Vec<(FiscalYear, LineItemSet)> = pairs
            .into_iter()
            .filter(|(_, items)| !items.is_empty())
            .collect();
        if years.is_empty() {
            return Err(PassportError::Normalization(
                "no usable fiscal years with line items were found".into(),
            ));
        }
        years.sort_by_key(|(year, _)| *year);
        for window in years.windows(2) {
            if window[0].0 == window[1].0 {
                return Err(PassportError::Normalization(format!(
                    "duplicate fiscal year {} in ledger",
                    window[0].0
                )));
            }
        }
        Ok(Ledger { years })
    }

    /// Years ascending.
    pub fn iter(&self) -> impl Iterator<Item = (FiscalYear, &LineItemSet)> {
        self.years.iter().map(|(year, items)| (*year, items))
    }

    pub fn years(&self) -> Vec<FiscalYear> {
        self.years.iter().map(|(year, _)| *year).collect()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn get(&self, year: FiscalYear) -> Option<&LineItemSet> {
        self.years
            .iter()
            .find(|(y, _)| *y == year)
            .map(|(_, items)| items)
    }

    /// The latest fiscal year and its line items. The ledger is never
    /// empty, so this always succeeds.
    pub fn latest(&self) -> (FiscalYear, &LineItemSet) {
        let (year, items) = self.years.last().expect("ledger is never empty");
        (*year, items)
    }

    /// A copy of this ledger with the latest year's line items replaced.
    /// The original is untouched.
    pub fn with_latest_replaced(&self, items: LineItemSet) -> Ledger {
        let mut years = self.years.clone();
        if let Some(last) = years.last_mut() {
            last.1 = items;
        }
        Ledger { years }
    }
}
