//! Sub-score aggregation: category ratios to a 0-100 sub-score.
//!
//! Undefined ratios are excluded from their category's average rather
//! than treated as zero; a category with no defined ratios yields an
//! undefined sub-score, surfaced as such instead of a fabricated number.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::ratios::RatioSet;
use crate::scoring::curves::ScoringPolicy;
use crate::types::{Category, MetricValue};

/// Sub-scores per category for the scoring year.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SubScoreSet {
    scores: BTreeMap<Category, MetricValue>,
}

impl SubScoreSet {
    pub fn get(&self, category: Category) -> MetricValue {
        self.scores
            .get(&category)
            .copied()
            .unwrap_or(MetricValue::Undefined)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, MetricValue)> + '_ {
        self.scores.iter().map(|(k, v)| (*k, *v))
    }

    pub fn defined_count(&self) -> usize {
        self.scores.values().filter(|v| v.is_defined()).count()
    }

    /// Presentation copy with every defined value rounded.
    pub fn rounded(&self, dp: u32) -> SubScoreSet {
        SubScoreSet {
            scores: self
                .scores
                .iter()
                .map(|(k, v)| (*k, v.round_dp(dp)))
                .collect(),
        }
    }
}

impl FromIterator<(Category, MetricValue)> for SubScoreSet {
    fn from_iter<T: IntoIterator<Item = (Category, MetricValue)>>(iter: T) -> Self {
        SubScoreSet {
            scores: iter.into_iter().collect(),
        }
    }
}

/// Compute every category's sub-score from the scoring year's ratios.
pub fn compute_sub_scores(ratios: &RatioSet, policy: &ScoringPolicy) -> SubScoreSet {
    Category::ALL
        .iter()
        .map(|category| (*category, category_score(*category, ratios, policy)))
        .collect()
}

fn category_score(
    category: Category,
    ratios: &RatioSet,
    policy: &ScoringPolicy,
) -> MetricValue {
    let mut sum = Decimal::ZERO;
    let mut count = 0u32;
    for curve in policy.curves_in(category) {
        if let Some(value) = ratios.get(curve.ratio).defined() {
            sum += curve.score(value);
            count += 1;
        }
    }
    if count == 0 {
        MetricValue::Undefined
    } else {
        MetricValue::Defined(sum / Decimal::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratios::Ratio;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn ratio_set(pairs: &[(Ratio, MetricValue)]) -> RatioSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_liquidity_average_of_both_curves() {
        let ratios = ratio_set(&[
            (Ratio::CurrentRatio, MetricValue::Defined(dec!(2))), // 100
            (Ratio::QuickRatio, MetricValue::Defined(dec!(0.5))), // 50
        ]);
        let scores = compute_sub_scores(&ratios, &ScoringPolicy::default());
        assert_eq!(
            scores.get(Category::Liquidity),
            MetricValue::Defined(dec!(75))
        );
    }

    #[test]
    fn test_undefined_ratio_excluded_from_average() {
        // Quick ratio undefined: liquidity rests on the current ratio
        // alone instead of averaging in a zero.
        let ratios = ratio_set(&[
            (Ratio::CurrentRatio, MetricValue::Defined(dec!(2))),
            (Ratio::QuickRatio, MetricValue::Undefined),
        ]);
        let scores = compute_sub_scores(&ratios, &ScoringPolicy::default());
        assert_eq!(
            scores.get(Category::Liquidity),
            MetricValue::Defined(dec!(100))
        );
    }

    #[test]
    fn test_category_with_no_defined_ratios_is_undefined() {
        let ratios = ratio_set(&[(Ratio::CurrentRatio, MetricValue::Defined(dec!(2)))]);
        let scores = compute_sub_scores(&ratios, &ScoringPolicy::default());
        assert_eq!(scores.get(Category::Leverage), MetricValue::Undefined);
        assert_eq!(scores.get(Category::Profitability), MetricValue::Undefined);
        assert_eq!(scores.defined_count(), 1);
    }

    #[test]
    fn test_leverage_uses_lower_is_better_curve() {
        let ratios = ratio_set(&[(Ratio::DebtToEquity, MetricValue::Defined(dec!(1.5)))]);
        let scores = compute_sub_scores(&ratios, &ScoringPolicy::default());
        assert_eq!(
            scores.get(Category::Leverage),
            MetricValue::Defined(dec!(50))
        );
    }

    #[test]
    fn test_sub_scores_stay_in_range() {
        let ratios = ratio_set(&[
            (Ratio::CurrentRatio, MetricValue::Defined(dec!(50))),
            (Ratio::QuickRatio, MetricValue::Defined(dec!(-10))),
            (Ratio::DebtToEquity, MetricValue::Defined(dec!(-5))),
        ]);
        let scores = compute_sub_scores(&ratios, &ScoringPolicy::default());
        for (_, score) in scores.iter() {
            if let Some(value) = score.defined() {
                assert!(value >= Decimal::ZERO && value <= dec!(100));
            }
        }
    }

    #[test]
    fn test_sub_scores_serialize_with_category_names() {
        let scores: SubScoreSet = [(Category::Liquidity, MetricValue::Defined(dec!(75)))]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&scores).unwrap();
        assert_eq!(json, serde_json::json!({ "Liquidity": 75.0 }));
    }
}
