use crate::models::{FactorResult, Recommendation};

/// Share of suitable factors in percent; 0 for an empty set
#[must_use]
pub fn percentage(results: &[FactorResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let suitable = results.iter().filter(|r| r.suitable).count();
    100.0 * suitable as f64 / results.len() as f64
}

#[must_use]
pub fn score(results: &[FactorResult]) -> (f64, Recommendation) {
    let pct = percentage(results);
    (pct, Recommendation::from_percentage(pct))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Factor;
    use rstest::rstest;

    fn results(suitable: usize) -> Vec<FactorResult> {
        Factor::ALL
            .iter()
            .enumerate()
            .map(|(i, factor)| FactorResult {
                factor: *factor,
                suitable: i < suitable,
                value: 1.0,
            })
            .collect()
    }

    #[rstest]
    #[case(6, Recommendation::Suitable)]
    #[case(5, Recommendation::Suitable)]
    #[case(4, Recommendation::Marginal)]
    #[case(3, Recommendation::Caution)]
    #[case(2, Recommendation::Unsuitable)]
    #[case(0, Recommendation::Unsuitable)]
    fn test_score_by_suitable_count(#[case] suitable: usize, #[case] expected: Recommendation) {
        let (pct, recommendation) = score(&results(suitable));
        assert!((pct - suitable as f64 * 100.0 / 6.0).abs() < 1e-9);
        assert_eq!(recommendation, expected);
    }

    #[test]
    fn test_empty_set_scores_zero() {
        assert_eq!(score(&[]), (0.0, Recommendation::Unsuitable));
    }
}
