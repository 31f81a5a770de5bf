use std::collections::BTreeMap;

use passport_core::ratios::Ratio;
use passport_core::report::{analyze, EngineConfig};
use passport_core::statement::{RawRow, RawStatementFile, RawTable};
use passport_core::types::{Category, MetricValue};
use passport_core::PassportError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures: raw tables the way the file-parsing collaborator hands them over
// ===========================================================================

fn row(label: &str, cells: &[(&str, &str)]) -> RawRow {
    RawRow {
        label: label.to_string(),
        cells: cells
            .iter()
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect::<BTreeMap<String, String>>(),
    }
}

fn sme_upload() -> Vec<RawStatementFile> {
    vec![RawStatementFile {
        source: "sme_financials.xlsx".to_string(),
        tables: vec![
            RawTable {
                name: "Income Statement".to_string(),
                rows: vec![
                    row(
                        "Revenue from operations",
                        &[("2022", "₹ 4,00,000"), ("2023", "₹ 5,00,000")],
                    ),
                    row(
                        "Cost of materials consumed",
                        &[("2022", "1,80,000"), ("2023", "2,10,000")],
                    ),
                    row(
                        "Purchases of stock-in-trade",
                        &[("2022", "60,000"), ("2023", "80,000")],
                    ),
                    row(
                        "Changes in inventories of goods, work-in-progress and stock-in-trade",
                        &[("2022", "(5,000)"), ("2023", "10,000")],
                    ),
                    row(
                        "Profit/(Loss) for the year",
                        &[("2022", "30,000"), ("2023", "50,000")],
                    ),
                ],
            },
            RawTable {
                name: "Balance Sheet".to_string(),
                rows: vec![
                    row(
                        "Current assets",
                        &[("2022", "2,00,000"), ("2023", "3,00,000")],
                    ),
                    row(
                        "Non-current assets",
                        &[("2022", "5,00,000"), ("2023", "7,00,000")],
                    ),
                    row(
                        "Current liabilities",
                        &[("2022", "1,00,000"), ("2023", "1,50,000")],
                    ),
                    row(
                        "Borrowings, non-current",
                        &[("2022", "1,50,000"), ("2023", "1,80,000")],
                    ),
                    row(
                        "Borrowings, current",
                        &[("2022", "50,000"), ("2023", "70,000")],
                    ),
                    row("Equity", &[("2022", "4,00,000"), ("2023", "5,00,000")]),
                    row("Inventories", &[("2022", "90,000"), ("2023", "1,20,000")]),
                    row(
                        "Trade Receivables",
                        &[("2022", "80,000"), ("2023", "1,00,000")],
                    ),
                ],
            },
        ],
    }]
}

// ===========================================================================
// Full pipeline
// ===========================================================================

#[test]
fn test_full_pipeline_detects_latest_year() {
    let card = analyze(&sme_upload(), &EngineConfig::default()).unwrap();
    assert_eq!(card.detected_fiscal_year, "2023");
}

#[test]
fn test_full_pipeline_latest_year_ratios() {
    let card = analyze(&sme_upload(), &EngineConfig::default()).unwrap();

    // Current ratio = 300k / 150k = 2.00
    assert_eq!(
        card.ratios.get(Ratio::CurrentRatio),
        MetricValue::Defined(dec!(2.00))
    );
    // Quick ratio = (300k - 120k) / 150k = 1.20
    assert_eq!(
        card.ratios.get(Ratio::QuickRatio),
        MetricValue::Defined(dec!(1.20))
    );
    // Debt to equity = (180k + 70k) / 500k = 0.50
    assert_eq!(
        card.ratios.get(Ratio::DebtToEquity),
        MetricValue::Defined(dec!(0.50))
    );
    // Net profit margin = 50k / 500k = 0.10
    assert_eq!(
        card.ratios.get(Ratio::NetProfitMargin),
        MetricValue::Defined(dec!(0.10))
    );
    // COGS = 210k + 80k + 10k = 300k, gross margin = 0.40
    assert_eq!(
        card.ratios.get(Ratio::GrossMargin),
        MetricValue::Defined(dec!(0.40))
    );
    // ROA over derived total assets (300k + 700k) = 0.05
    assert_eq!(
        card.ratios.get(Ratio::ReturnOnAssets),
        MetricValue::Defined(dec!(0.05))
    );
}

#[test]
fn test_overall_score_is_null_or_in_range() {
    let card = analyze(&sme_upload(), &EngineConfig::default()).unwrap();
    match card.overall_score {
        MetricValue::Defined(score) => {
            assert!(score >= Decimal::ZERO && score <= dec!(100));
        }
        MetricValue::Undefined => {}
    }
}

#[test]
fn test_every_category_scored_for_complete_statement() {
    let card = analyze(&sme_upload(), &EngineConfig::default()).unwrap();
    for category in Category::ALL {
        assert!(
            card.sub_scores.get(category).is_defined(),
            "{category} should be defined for a complete statement"
        );
    }
}

#[test]
fn test_normalization_is_deterministic_end_to_end() {
    let config = EngineConfig::default();
    let first = analyze(&sme_upload(), &config).unwrap();
    let second = analyze(&sme_upload(), &config).unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn test_trend_rows_one_cell_per_year_ascending() {
    let card = analyze(&sme_upload(), &EngineConfig::default()).unwrap();
    let json = serde_json::to_value(&card).unwrap();
    for trend in json["trends"].as_array().unwrap() {
        let object = trend.as_object().unwrap();
        let years: Vec<&String> = object.keys().filter(|k| *k != "Metric").collect();
        assert_eq!(years, vec!["2022", "2023"]);
    }
}

// ===========================================================================
// Undefined propagation
// ===========================================================================

#[test]
fn test_missing_inventory_leaves_quick_ratio_undefined() {
    let files = vec![RawStatementFile {
        source: "partial.xlsx".to_string(),
        tables: vec![RawTable {
            name: "Balance Sheet".to_string(),
            rows: vec![
                row("Current assets", &[("2023", "300")]),
                row("Current liabilities", &[("2023", "150")]),
            ],
        }],
    }];
    let card = analyze(&files, &EngineConfig::default()).unwrap();

    // No silently substituted zero: quick ratio is undefined while the
    // current ratio computes normally.
    assert_eq!(card.ratios.get(Ratio::QuickRatio), MetricValue::Undefined);
    assert_eq!(
        card.ratios.get(Ratio::CurrentRatio),
        MetricValue::Defined(dec!(2.00))
    );

    let json = serde_json::to_value(&card).unwrap();
    assert!(json["ratios"]["Quick Ratio"].is_null());
}

#[test]
fn test_undefined_categories_redistribute_weight() {
    // Only liquidity line items: three categories undefined, overall
    // score still defined and equal to the liquidity sub-score.
    let files = vec![RawStatementFile {
        source: "liquidity_only.xlsx".to_string(),
        tables: vec![RawTable {
            name: "Balance Sheet".to_string(),
            rows: vec![
                row("Current assets", &[("2023", "300")]),
                row("Inventories", &[("2023", "100")]),
                row("Current liabilities", &[("2023", "150")]),
            ],
        }],
    }];
    let card = analyze(&files, &EngineConfig::default()).unwrap();

    assert!(card.sub_scores.get(Category::Liquidity).is_defined());
    assert_eq!(card.sub_scores.get(Category::Profitability), MetricValue::Undefined);
    assert_eq!(card.sub_scores.get(Category::Leverage), MetricValue::Undefined);
    assert_eq!(
        card.overall_score,
        card.sub_scores.get(Category::Liquidity),
        "sole defined category carries the entire weight"
    );
}

#[test]
fn test_benchmark_insufficient_data_for_undefined_ratios() {
    let files = vec![RawStatementFile {
        source: "thin.xlsx".to_string(),
        tables: vec![RawTable {
            name: "Income Statement".to_string(),
            rows: vec![
                row("Revenue", &[("2023", "500")]),
                row("Net Income", &[("2023", "50")]),
            ],
        }],
    }];
    let card = analyze(&files, &EngineConfig::default()).unwrap();
    let json = serde_json::to_value(&card).unwrap();

    let comparisons = json["benchmark"].as_array().unwrap();
    let inventory_turnover = comparisons
        .iter()
        .find(|c| c["metric"] == "Inventory Turnover")
        .unwrap();
    assert_eq!(inventory_turnover["classification"], "insufficient_data");
    assert!(inventory_turnover["company_value"].is_null());

    // Margin 0.10 against the 0.08 +/- 0.04 band: measurable, within.
    let margin = comparisons
        .iter()
        .find(|c| c["metric"] == "Net Profit Margin")
        .unwrap();
    assert_eq!(margin["classification"], "within");
}

// ===========================================================================
// Structural failures
// ===========================================================================

#[test]
fn test_unusable_upload_is_a_single_error() {
    let files = vec![RawStatementFile {
        source: "scan.xlsx".to_string(),
        tables: vec![RawTable {
            name: "Sheet1".to_string(),
            rows: vec![row("Notes to accounts", &[("2023", "see annexure")])],
        }],
    }];
    let err = analyze(&files, &EngineConfig::default()).unwrap_err();
    assert!(matches!(err, PassportError::Normalization(_)));
}

#[test]
fn test_later_file_wins_for_overlapping_year() {
    let mut files = sme_upload();
    files.push(RawStatementFile {
        source: "restated_2023.xlsx".to_string(),
        tables: vec![RawTable {
            name: "Income Statement".to_string(),
            rows: vec![row("Profit/(Loss) for the year", &[("2023", "75,000")])],
        }],
    });
    let card = analyze(&files, &EngineConfig::default()).unwrap();
    // Restated profit overrides: margin = 75k / 500k = 0.15.
    assert_eq!(
        card.ratios.get(Ratio::NetProfitMargin),
        MetricValue::Defined(dec!(0.15))
    );
}
