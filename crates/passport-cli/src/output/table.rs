use serde_json::Value;
use tabled::{builder::Builder, Table};

use crate::output::is_simulation_report;

/// Format a scorecard (or what-if report) as tables using tabled.
pub fn print_table(value: &Value) {
    if is_simulation_report(value) {
        println!("== Baseline ==");
        print_scorecard(&value["baseline"]);
        println!("\n== Simulation ==");
        print_scorecard(&value["simulation"]);
        return;
    }
    print_scorecard(value);
}

fn print_scorecard(card: &Value) {
    if let Some(year) = card["detected_fiscal_year"].as_str() {
        println!("Fiscal year: {}", year);
    }
    println!("Overall score: {}", format_value(&card["overall_score"]));

    if let Value::Object(sub_scores) = &card["sub_scores"] {
        let mut builder = Builder::default();
        builder.push_record(["Category", "Score"]);
        for (category, score) in sub_scores {
            builder.push_record([category.as_str(), &format_value(score)]);
        }
        println!("\n{}", Table::from(builder));
    }

    if let Value::Object(ratios) = &card["ratios"] {
        let mut builder = Builder::default();
        builder.push_record(["Ratio", "Value"]);
        for (name, ratio) in ratios {
            builder.push_record([name.as_str(), &format_value(ratio)]);
        }
        println!("\n{}", Table::from(builder));
    }

    if let Some(trends) = card["trends"].as_array() {
        print_trend_table(trends);
    }

    if let Some(benchmark) = card["benchmark"].as_array() {
        print_benchmark_table(benchmark);
    }
}

fn print_trend_table(trends: &[Value]) {
    let Some(Value::Object(first)) = trends.first() else {
        return;
    };

    // "Metric" leads; the remaining keys are the fiscal years, already
    // sorted ascending in the serialized map.
    let mut headers: Vec<String> = vec!["Metric".to_string()];
    headers.extend(first.keys().filter(|k| *k != "Metric").cloned());

    let mut builder = Builder::default();
    builder.push_record(&headers);
    for trend in trends {
        if let Value::Object(map) = trend {
            let row: Vec<String> = headers
                .iter()
                .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("\n{}", Table::from(builder));
}

fn print_benchmark_table(benchmark: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Company", "Benchmark", "Deviation", "Classification"]);
    for comparison in benchmark {
        builder.push_record([
            comparison["metric"].as_str().unwrap_or_default().to_string(),
            format_value(&comparison["company_value"]),
            format_value(&comparison["benchmark_value"]),
            format_value(&comparison["deviation"]),
            comparison["classification"]
                .as_str()
                .unwrap_or_default()
                .replace('_', " "),
        ]);
    }
    println!("\n{}", Table::from(builder));
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "n/a".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
