use super::calibration::{Calibration, check_parameters};
use super::error::Result;
use super::rng::{scenario_rng, standard_normal};
use super::types::{POPULATION_SIZE, Population, Sample, ScenarioKey, ScenarioParameters};

/// Lower clamp applied to every sampled value.
pub const FLOOR_VALUE: f64 = 50.0;
pub const MIN_RETENTION: f64 = 0.5;
pub const MAX_RETENTION: f64 = 0.95;
/// Retention moves by this much per unit of the shared normal draw.
const RETENTION_SCALE: f64 = 0.08;

/// Draws a fresh population of [`POPULATION_SIZE`] samples for `scenario`.
pub fn generate_population(
    scenario: ScenarioKey,
    calibration: &Calibration,
    seed: u64,
) -> Result<Population> {
    let params = calibration.scenario(scenario)?.parameters;
    check_parameters(scenario, &params)?;
    let mut rng = scenario_rng(seed, scenario.ordinal());

    let population: Population = (0..POPULATION_SIZE)
        .map(|_| sample_pair(&params, standard_normal(&mut rng)))
        .collect();

    tracing::debug!(%scenario, seed, samples = population.len(), "generated population");
    Ok(population)
}

/// Both fields share `z`, so high value outcomes come with high retention.
fn sample_pair(params: &ScenarioParameters, z: f64) -> Sample {
    Sample {
        value: (params.mean_value + z * params.std_dev_value).max(FLOOR_VALUE),
        retention: (params.mean_retention + z * RETENTION_SCALE)
            .clamp(MIN_RETENTION, MAX_RETENTION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EngineError;

    fn pearson(population: &[Sample]) -> f64 {
        let n = population.len() as f64;
        let mv = population.iter().map(|s| s.value).sum::<f64>() / n;
        let mr = population.iter().map(|s| s.retention).sum::<f64>() / n;
        let mut cov = 0.0;
        let mut vv = 0.0;
        let mut vr = 0.0;
        for s in population {
            cov += (s.value - mv) * (s.retention - mr);
            vv += (s.value - mv).powi(2);
            vr += (s.retention - mr).powi(2);
        }
        cov / (vv.sqrt() * vr.sqrt())
    }

    #[test]
    fn every_scenario_yields_bounded_population_of_fixed_size() {
        let calibration = Calibration::default();
        for key in ScenarioKey::ALL_KEYS {
            let population = generate_population(key, &calibration, 42).unwrap();
            assert_eq!(population.len(), POPULATION_SIZE);
            for s in &population {
                assert!(s.value >= FLOOR_VALUE, "{key}: value {}", s.value);
                assert!(
                    (MIN_RETENTION..=MAX_RETENTION).contains(&s.retention),
                    "{key}: retention {}",
                    s.retention
                );
            }
        }
    }

    #[test]
    fn same_seed_reproduces_population() {
        let calibration = Calibration::default();
        let a = generate_population(ScenarioKey::Base, &calibration, 7).unwrap();
        let b = generate_population(ScenarioKey::Base, &calibration, 7).unwrap();
        let c = generate_population(ScenarioKey::Base, &calibration, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn value_and_retention_are_positively_correlated() {
        let calibration = Calibration::default();
        let population = generate_population(ScenarioKey::Optimistic, &calibration, 3).unwrap();
        assert!(pearson(&population) > 0.8);
    }

    #[test]
    fn sample_pair_applies_floor_and_retention_clamp() {
        let params = ScenarioParameters {
            mean_value: 60.0,
            std_dev_value: 10.0,
            mean_retention: 0.9,
        };
        let low = sample_pair(&params, -3.0);
        assert_eq!(low.value, FLOOR_VALUE);
        assert!((low.retention - 0.66).abs() < 1e-12);

        let high = sample_pair(&params, 2.0);
        assert!((high.value - 80.0).abs() < 1e-12);
        assert_eq!(high.retention, MAX_RETENTION);
    }

    #[test]
    fn non_positive_spread_is_rejected_before_sampling() {
        for std_dev_value in [-13.5, 0.0, f64::NAN] {
            let mut calibration = Calibration::default();
            calibration
                .scenarios
                .get_mut(&ScenarioKey::Base)
                .unwrap()
                .parameters
                .std_dev_value = std_dev_value;
            let err = generate_population(ScenarioKey::Base, &calibration, 3).unwrap_err();
            assert!(
                matches!(err, EngineError::InvalidCalibration(ref msg) if msg.contains("stdDevValue")),
                "std_dev_value {std_dev_value}: {err}"
            );
        }
    }

    #[test]
    fn missing_calibration_entry_is_unknown_scenario() {
        let mut calibration = Calibration::default();
        calibration.scenarios.remove(&ScenarioKey::Base);
        let err = generate_population(ScenarioKey::Base, &calibration, 1).unwrap_err();
        assert!(matches!(err, EngineError::UnknownScenario(k) if k == "base"));
    }
}
