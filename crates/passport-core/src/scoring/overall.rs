//! Overall Financial Passport score: weighted mean of defined sub-scores.
//!
//! When a category is undefined its weight is redistributed
//! proportionally among the remaining categories, so the overall score is
//! defined whenever at least one sub-score is. Only when every category
//! is undefined does the overall score come back undefined.

use rust_decimal::Decimal;

use crate::scoring::curves::ScoringPolicy;
use crate::scoring::subscores::SubScoreSet;
use crate::types::MetricValue;

/// Combine sub-scores into the overall 0-100 score.
pub fn compute_overall(sub_scores: &SubScoreSet, policy: &ScoringPolicy) -> MetricValue {
    let mut weighted_sum = Decimal::ZERO;
    let mut weight_total = Decimal::ZERO;

    for (category, score) in sub_scores.iter() {
        let (Some(value), Some(weight)) = (score.defined(), policy.weight_for(category))
        else {
            continue;
        };
        weighted_sum += value * weight;
        weight_total += weight;
    }

    if weight_total.is_zero() {
        MetricValue::Undefined
    } else {
        // Dividing by the surviving weight total is the proportional
        // redistribution: remaining weights rescale to sum to 1.
        MetricValue::Defined(weighted_sum / weight_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn scores(pairs: &[(Category, MetricValue)]) -> SubScoreSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_equal_weights_give_simple_average() {
        let subs = scores(&[
            (Category::Liquidity, MetricValue::Defined(dec!(80))),
            (Category::Profitability, MetricValue::Defined(dec!(60))),
            (Category::Leverage, MetricValue::Defined(dec!(40))),
            (Category::Efficiency, MetricValue::Defined(dec!(20))),
        ]);
        let overall = compute_overall(&subs, &ScoringPolicy::default());
        assert_eq!(overall, MetricValue::Defined(dec!(50)));
    }

    #[test]
    fn test_undefined_category_weight_redistributed() {
        // Three defined categories at 0.25 weight each: each effectively
        // carries 1/3 after redistribution.
        let subs = scores(&[
            (Category::Liquidity, MetricValue::Defined(dec!(90))),
            (Category::Profitability, MetricValue::Defined(dec!(60))),
            (Category::Leverage, MetricValue::Defined(dec!(30))),
            (Category::Efficiency, MetricValue::Undefined),
        ]);
        let overall = compute_overall(&subs, &ScoringPolicy::default());
        assert_eq!(overall, MetricValue::Defined(dec!(60)));
    }

    #[test]
    fn test_single_defined_category_carries_full_weight() {
        let subs = scores(&[
            (Category::Liquidity, MetricValue::Defined(dec!(42))),
            (Category::Profitability, MetricValue::Undefined),
            (Category::Leverage, MetricValue::Undefined),
            (Category::Efficiency, MetricValue::Undefined),
        ]);
        let overall = compute_overall(&subs, &ScoringPolicy::default());
        assert_eq!(overall, MetricValue::Defined(dec!(42)));
    }

    #[test]
    fn test_all_undefined_gives_undefined_overall() {
        let subs = scores(&[
            (Category::Liquidity, MetricValue::Undefined),
            (Category::Profitability, MetricValue::Undefined),
            (Category::Leverage, MetricValue::Undefined),
            (Category::Efficiency, MetricValue::Undefined),
        ]);
        let overall = compute_overall(&subs, &ScoringPolicy::default());
        assert_eq!(overall, MetricValue::Undefined);
    }

    #[test]
    fn test_overall_respects_unequal_weights() {
        let mut policy = ScoringPolicy::default();
        for w in &mut policy.weights {
            w.weight = match w.category {
                Category::Profitability => dec!(0.4),
                Category::Liquidity => dec!(0.3),
                Category::Leverage => dec!(0.2),
                Category::Efficiency => dec!(0.1),
            };
        }
        policy.validate().unwrap();

        let subs = scores(&[
            (Category::Liquidity, MetricValue::Defined(dec!(100))),
            (Category::Profitability, MetricValue::Defined(dec!(50))),
            (Category::Leverage, MetricValue::Defined(dec!(0))),
            (Category::Efficiency, MetricValue::Defined(dec!(100))),
        ]);
        // 0.3*100 + 0.4*50 + 0.2*0 + 0.1*100 = 60
        let overall = compute_overall(&subs, &policy);
        assert_eq!(overall, MetricValue::Defined(dec!(60)));
    }

    #[test]
    fn test_overall_always_within_score_range() {
        let subs = scores(&[
            (Category::Liquidity, MetricValue::Defined(dec!(100))),
            (Category::Profitability, MetricValue::Defined(dec!(100))),
            (Category::Leverage, MetricValue::Defined(dec!(100))),
            (Category::Efficiency, MetricValue::Defined(dec!(100))),
        ]);
        let overall = compute_overall(&subs, &ScoringPolicy::default());
        assert_eq!(overall, MetricValue::Defined(dec!(100)));
    }
}
