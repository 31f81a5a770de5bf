use serde_json::Value;
use std::io;

use crate::output::is_simulation_report;

/// Write output as CSV to stdout.
///
/// For a scorecard this is the trend matrix (the artifact a spreadsheet
/// user actually wants back), one row per metric with a column per
/// fiscal year. A what-if report gets an extra leading "case" column
/// covering both the baseline and the simulation.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    if is_simulation_report(value) {
        write_trends(&mut wtr, &value["baseline"], Some("baseline"));
        write_trends(&mut wtr, &value["simulation"], Some("simulation"));
    } else if value.get("trends").is_some() {
        write_trends(&mut wtr, value, None);
    } else {
        // Generic fallback: two-column field,value.
        if let Value::Object(map) = value {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
    }

    let _ = wtr.flush();
}

fn write_trends(
    wtr: &mut csv::Writer<io::StdoutLock<'_>>,
    card: &Value,
    case: Option<&str>,
) {
    let Some(trends) = card["trends"].as_array() else {
        return;
    };
    let Some(Value::Object(first)) = trends.first() else {
        return;
    };

    let mut headers: Vec<String> = Vec::new();
    if case.is_some() {
        headers.push("case".to_string());
    }
    headers.push("Metric".to_string());
    headers.extend(first.keys().filter(|k| *k != "Metric").cloned());

    // One header row per report; the simulation block reuses the baseline's.
    if case != Some("simulation") {
        let _ = wtr.write_record(&headers);
    }

    for trend in trends {
        if let Value::Object(map) = trend {
            let mut row: Vec<String> = Vec::with_capacity(headers.len());
            if let Some(case) = case {
                row.push(case.to_string());
            }
            for header in headers.iter().skip(usize::from(case.is_some())) {
                row.push(
                    map.get(header.as_str())
                        .map(format_csv_value)
                        .unwrap_or_default(),
                );
            }
            let _ = wtr.write_record(&row);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
