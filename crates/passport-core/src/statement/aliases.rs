//! Label alias table for statement normalization.
//!
//! Maps the heterogeneous row labels found in uploaded statements
//! ("Total Current Assets", "Trade Receivables", "Borrowings, current")
//! to canonical line items. The table is configuration, not code: it is
//! serde-loadable so new label vocabularies need no engine change.
//!
//! Lookup is case-insensitive and whitespace-collapsing. An entry marked
//! `additive` contributes a component that accumulates into its canonical
//! key instead of replacing it (borrowings split by maturity, the COGS
//! component rows of Schedule III income statements).

use serde::{Deserialize, Serialize};

use crate::error::PassportError;
use crate::statement::line_items::LineItem;
use crate::PassportResult;

/// One label-to-canonical-key mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Source label as it appears in the statement row.
    pub label: String,
    /// Canonical line item the label maps to.
    pub item: LineItem,
    /// Component rows accumulate into the key instead of replacing it.
    #[serde(default, skip_serializing_if = "is_false")]
    pub additive: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The configurable alias table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new(entries: Vec<AliasEntry>) -> PassportResult<AliasTable> {
        let table = AliasTable { entries };
        table.validate()?;
        Ok(table)
    }

    /// Reject tables where one normalized label maps to two different
    /// canonical keys. Duplicate spellings of the same mapping are fine.
    pub fn validate(&self) -> PassportResult<()> {
        if self.entries.is_empty() {
            return Err(PassportError::Configuration {
                component: "alias table".into(),
                reason: "at least one alias entry is required".into(),
            });
        }
        for (i, a) in self.entries.iter().enumerate() {
            if normalize_label(&a.label).is_empty() {
                return Err(PassportError::Configuration {
                    component: "alias table".into(),
                    reason: format!("entry {} has a blank label", i),
                });
            }
            for b in &self.entries[i + 1..] {
                if normalize_label(&a.label) == normalize_label(&b.label)
                    && (a.item != b.item || a.additive != b.additive)
                {
                    return Err(PassportError::Configuration {
                        component: "alias table".into(),
                        reason: format!(
                            "label '{}' maps to both {} and {}",
                            a.label, a.item, b.item
                        ),
                    });
                }
            }
        }
        Ok(())
    }

    /// Resolve a raw row label to its canonical key, if any.
    pub fn resolve(&self, label: &str) -> Option<&AliasEntry> {
        let wanted = normalize_label(label);
        if wanted.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| normalize_label(&e.label) == wanted)
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }
}

/// Lowercase and collapse internal whitespace.
fn normalize_label(label: &str) -> String {
    label
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Default for AliasTable {
    /// Built-in vocabulary: Indian Schedule III statement labels plus
    /// common Western synonyms.
    fn default() -> Self {
        fn plain(label: &str, item: LineItem) -> AliasEntry {
            AliasEntry {
                label: label.to_string(),
                item,
                additive: false,
            }
        }
        fn additive(label: &str, item: LineItem) -> AliasEntry {
            AliasEntry {
                label: label.to_string(),
                item,
                additive: true,
            }
        }

        AliasTable {
            entries: vec![
                // Income statement
                plain("Revenue from operations", LineItem::Revenue),
                plain("Revenue", LineItem::Revenue),
                plain("Total Revenue", LineItem::Revenue),
                plain("Net Sales", LineItem::Revenue),
                plain("Sales", LineItem::Revenue),
                plain("Profit/(Loss) for the year", LineItem::NetIncome),
                plain("Profit for the year", LineItem::NetIncome),
                plain("Net Income", LineItem::NetIncome),
                plain("Net Profit", LineItem::NetIncome),
                plain("Profit after tax", LineItem::NetIncome),
                plain("Cost of goods sold", LineItem::Cogs),
                plain("COGS", LineItem::Cogs),
                additive("Cost of materials consumed", LineItem::Cogs),
                additive("Purchases of stock-in-trade", LineItem::Cogs),
                additive(
                    "Changes in inventories of goods, work-in-progress and stock-in-trade",
                    LineItem::Cogs,
                ),
                // Balance sheet: assets
                plain("Current assets", LineItem::CurrentAssets),
                plain("Total Current Assets", LineItem::CurrentAssets),
                plain("Non-current assets", LineItem::NonCurrentAssets),
                plain("Total Non-Current Assets", LineItem::NonCurrentAssets),
                plain("Total assets", LineItem::TotalAssets),
                plain("Inventories", LineItem::Inventory),
                plain("Inventory", LineItem::Inventory),
                plain("Trade Receivables", LineItem::Receivables),
                plain("Accounts Receivable", LineItem::Receivables),
                plain("Receivables", LineItem::Receivables),
                plain("Cash and cash equivalents", LineItem::Cash),
                plain("Cash", LineItem::Cash),
                // Balance sheet: liabilities and equity
                plain("Current liabilities", LineItem::CurrentLiabilities),
                plain("Total Current Liabilities", LineItem::CurrentLiabilities),
                plain("Total Debt", LineItem::TotalDebt),
                additive("Borrowings, non-current", LineItem::TotalDebt),
                additive("Borrowings, current", LineItem::TotalDebt),
                additive("Long-term borrowings", LineItem::TotalDebt),
                additive("Short-term borrowings", LineItem::TotalDebt),
                plain("Equity", LineItem::Equity),
                plain("Total Equity", LineItem::Equity),
                plain("Shareholders' funds", LineItem::Equity),
                plain("Total shareholders' equity", LineItem::Equity),
            ],
        }
    }
}
