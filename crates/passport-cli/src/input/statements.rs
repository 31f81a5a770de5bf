use passport_core::statement::RawStatementFile;

use crate::input::{csv_in, file, stdin};

/// Collect raw statement files from the available sources, in upload
/// order: the `--input` JSON contract first, then any `--csv`
/// tabulations, falling back to piped stdin JSON. Order matters: the
/// normalizer gives later files precedence for overlapping years.
pub fn gather(
    input: &Option<String>,
    csv_paths: &[String],
) -> Result<Vec<RawStatementFile>, Box<dyn std::error::Error>> {
    let mut files: Vec<RawStatementFile> = Vec::new();

    if let Some(path) = input {
        let mut from_json: Vec<RawStatementFile> = file::read_json(path)?;
        files.append(&mut from_json);
    }
    for path in csv_paths {
        files.push(csv_in::read_statement_csv(path)?);
    }

    if files.is_empty() {
        if let Some(piped) = stdin::read_stdin()? {
            files = serde_json::from_value(piped)
                .map_err(|e| format!("Failed to parse statements from stdin: {}", e))?;
        }
    }

    if files.is_empty() {
        return Err("no statements provided (use --input, --csv, or pipe JSON on stdin)".into());
    }
    Ok(files)
}
