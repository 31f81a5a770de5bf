use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;
use passport_core::statement::{RawRow, RawStatementFile, RawTable};

use crate::input::file::resolve_path;

/// Read one statement tabulation from CSV.
///
/// Expected shape mirrors the uploaded spreadsheets: a label column first
/// ("Field"), then one column per fiscal year, e.g.
/// `Field,2022,2023`. Cell contents stay raw strings; coercion and year
/// detection belong to the engine's normalizer.
pub fn read_statement_csv(path: &str) -> Result<RawStatementFile, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(format!(
            "'{}' needs a label column plus at least one value column",
            canonical.display()
        )
        .into());
    }

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let label = record.get(0).unwrap_or("").to_string();
        let cells: BTreeMap<String, String> = headers
            .iter()
            .skip(1)
            .zip(record.iter().skip(1))
            .map(|(header, cell)| (header.to_string(), cell.to_string()))
            .collect();
        rows.push(RawRow { label, cells });
    }

    let source = canonical
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_string();
    let table_name = Path::new(&source)
        .file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or("Statement")
        .to_string();

    Ok(RawStatementFile {
        source,
        tables: vec![RawTable {
            name: table_name,
            rows,
        }],
    })
}
