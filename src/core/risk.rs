use super::types::{RiskTier, Sample, ScatterPoint, round1};

pub const DEFAULT_SCATTER_PREFIX: usize = 800;

const LOW_RISK_ABOVE: f64 = 0.78;
const MEDIUM_RISK_ABOVE: f64 = 0.70;

/// Retention strictly above 0.78 is low risk, strictly above 0.70 is medium,
/// anything else is high.
pub fn risk_tier(retention: f64) -> RiskTier {
    if retention > LOW_RISK_ABOVE {
        RiskTier::Low
    } else if retention > MEDIUM_RISK_ABOVE {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

/// Labels the first `prefix_size` samples in generation order.
pub fn classify_scatter(population: &[Sample], prefix_size: usize) -> Vec<ScatterPoint> {
    population
        .iter()
        .take(prefix_size)
        .map(|s| ScatterPoint {
            market_share_percent: round1(s.retention * 100.0),
            value: round1(s.value),
            risk_tier: risk_tier(s.retention),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    #[test]
    fn tier_boundaries_are_exclusive_on_the_upper_tier() {
        assert_eq!(risk_tier(0.78), RiskTier::Medium);
        assert_eq!(risk_tier(0.780_001), RiskTier::Low);
        assert_eq!(risk_tier(0.70), RiskTier::High);
        assert_eq!(risk_tier(0.700_001), RiskTier::Medium);
        assert_eq!(risk_tier(0.5), RiskTier::High);
        assert_eq!(risk_tier(0.95), RiskTier::Low);
    }

    #[test]
    fn scatter_keeps_generation_order_and_rounds() {
        let population = vec![
            Sample {
                value: 101.26,
                retention: 0.8123,
            },
            Sample {
                value: 55.04,
                retention: 0.7,
            },
            Sample {
                value: 90.0,
                retention: 0.75,
            },
        ];
        let points = classify_scatter(&population, 2);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, 101.3);
        assert_eq!(points[0].market_share_percent, 81.2);
        assert_eq!(points[0].risk_tier, RiskTier::Low);
        assert_eq!(points[1].value, 55.0);
        assert_eq!(points[1].market_share_percent, 70.0);
        assert_eq!(points[1].risk_tier, RiskTier::High);
    }

    proptest! {
        #[test]
        fn prop_scatter_length_is_bounded_by_prefix(
            len in 0usize..1_200,
            prefix in 0usize..1_000,
        ) {
            let population = vec![Sample { value: 75.0, retention: 0.74 }; len];
            let points = classify_scatter(&population, prefix);
            prop_assert_eq!(points.len(), len.min(prefix));
            prop_assert!(points.iter().all(|p| p.risk_tier == RiskTier::Medium));
        }
    }
}
