use serde_json::Value;

use crate::output::is_simulation_report;

/// Print just the key answer: the overall Financial Passport score.
/// What-if reports show the baseline and simulated scores side by side.
pub fn print_minimal(value: &Value) {
    if is_simulation_report(value) {
        println!(
            "{} -> {}",
            format_score(&value["baseline"]["overall_score"]),
            format_score(&value["simulation"]["overall_score"])
        );
        return;
    }
    println!("{}", format_score(&value["overall_score"]));
}

fn format_score(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
