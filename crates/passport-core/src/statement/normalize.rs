//! Statement normalizer: raw extracted tables to a canonical ledger.
//!
//! Covers:
//! 1. **Alias resolution** -- row labels to canonical keys via the alias table.
//! 2. **Numeric coercion** -- currency symbols and thousand separators
//!    stripped, parentheses negative, blank cells absent.
//! 3. **Year detection** -- 4-digit fiscal year from column headers, with
//!    the source filename as fallback.
//! 4. **Deduplication** -- when the same fiscal year arrives in several
//!    files, the later file overrides the earlier one per line item.
//!
//! Pure transform: the same raw input always yields the same ledger.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PassportError;
use crate::statement::aliases::AliasTable;
use crate::statement::line_items::{Ledger, LineItemSet};
use crate::types::FiscalYear;
use crate::PassportResult;

// ---------------------------------------------------------------------------
// Input contract
// ---------------------------------------------------------------------------

/// One uploaded file, already tabulated by the file-parsing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawStatementFile {
    /// Source name (typically the uploaded filename), used for fallback
    /// year detection and error messages.
    pub source: String,
    pub tables: Vec<RawTable>,
}

/// One extracted table (e.g. the "Income Statement" sheet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    pub name: String,
    pub rows: Vec<RawRow>,
}

/// One extracted row: a label plus raw string cells keyed by column header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRow {
    pub label: String,
    pub cells: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Normalize uploaded statement files into a canonical multi-year ledger.
///
/// File order is the precedence order: a fiscal year present in two files
/// takes each line item's value from the later file.
pub fn normalize_statements(
    files: &[RawStatementFile],
    aliases: &AliasTable,
) -> PassportResult<Ledger> {
    if files.is_empty() {
        return Err(PassportError::Normalization(
            "no statement files provided".into(),
        ));
    }

    let mut merged: BTreeMap<FiscalYear, LineItemSet> = BTreeMap::new();
    for file in files {
        let per_file = normalize_file(file, aliases)?;
        for (year, items) in per_file {
            let target = merged.entry(year).or_default();
            for (item, value) in items.iter() {
                target.set(item, value);
            }
        }
    }

    Ledger::from_pairs(merged.into_iter().collect())
}

fn normalize_file(
    file: &RawStatementFile,
    aliases: &AliasTable,
) -> PassportResult<BTreeMap<FiscalYear, LineItemSet>> {
    let fallback_year = detect_year(&file.source);

    let mut out: BTreeMap<FiscalYear, LineItemSet> = BTreeMap::new();
    let mut numeric_cells = 0usize;
    let mut dated_cells = 0usize;

    for table in &file.tables {
        for row in &table.rows {
            let alias = aliases.resolve(&row.label);
            for (header, raw) in &row.cells {
                let Some(amount) = coerce_amount(raw) else {
                    continue;
                };
                numeric_cells += 1;

                let Some(year) = detect_year(header).or(fallback_year) else {
                    continue;
                };
                dated_cells += 1;

                if let Some(alias) = alias {
                    let set = out.entry(year).or_default();
                    if alias.additive {
                        set.accumulate(alias.item, amount);
                    } else {
                        // Within one file, a later row for the same key wins.
                        set.set(alias.item, amount);
                    }
                }
            }
        }
    }

    if numeric_cells == 0 {
        return Err(PassportError::Normalization(format!(
            "no parsable numeric columns found in '{}'",
            file.source
        )));
    }
    if dated_cells == 0 {
        return Err(PassportError::Normalization(format!(
            "no fiscal year could be detected for '{}'",
            file.source
        )));
    }

    Ok(out)
}

// ---------------------------------------------------------------------------
// Cell coercion
// ---------------------------------------------------------------------------

/// Coerce a raw statement cell into a decimal amount.
///
/// Returns None for blank or placeholder cells and anything that is not a
/// number once currency symbols and separators are stripped. Parenthesized
/// amounts are negative, accountant style.
pub fn coerce_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.to_lowercase().as_str() {
        "-" | "--" | "n/a" | "na" | "nil" | "none" => return None,
        _ => {}
    }

    let parenthesized = trimmed.starts_with('(') && trimmed.ends_with(')');
    let inner = if parenthesized {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    let mut cleaned = String::with_capacity(inner.len());
    for ch in inner.chars() {
        match ch {
            '0'..='9' | '.' | '-' => cleaned.push(ch),
            ',' | ' ' | '\u{00a0}' | '_' => {}
            '$' | '€' | '£' | '₹' | '¥' => {}
            _ => return None,
        }
    }
    if cleaned.is_empty() {
        return None;
    }

    let value: Decimal = cleaned.parse().ok()?;
    Some(if parenthesized { -value } else { value })
}

// ---------------------------------------------------------------------------
// Year detection
// ---------------------------------------------------------------------------

/// Extract a fiscal year from a column header or filename: the first
/// standalone 4-digit run in the plausible 1900-2100 range. "FY2023",
/// "2023-24" and "statements_2024.xlsx" all resolve.
pub fn detect_year(text: &str) -> Option<FiscalYear> {
    let mut run = String::new();
    // Trailing sentinel flushes the final run.
    for ch in text.chars().chain(std::iter::once('\0')) {
        if ch.is_ascii_digit() {
            run.push(ch);
            continue;
        }
        if run.len() == 4 {
            if let Ok(year) = run.parse::<i32>() {
                if (1900..=2100).contains(&year) {
                    return Some(FiscalYear(year));
                }
            }
        }
        run.clear();
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
