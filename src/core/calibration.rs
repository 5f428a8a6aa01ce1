use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};
use super::types::{HORIZON_YEARS, ScenarioKey, ScenarioParameters, ScenarioRow};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioCalibration {
    pub parameters: ScenarioParameters,
    /// Multipliers applied to the summary percentiles, one per projected year.
    pub growth_factors: [f64; HORIZON_YEARS],
}

/// Calibration constants: sampling parameters, growth curves and the static
/// comparison table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    pub scenarios: BTreeMap<ScenarioKey, ScenarioCalibration>,
    pub comparison: Vec<ScenarioRow>,
}

const BASE_GROWTH: [f64; HORIZON_YEARS] = [0.15, 0.28, 0.42, 0.58, 0.75, 0.88];
const CONSERVATIVE_GROWTH: [f64; HORIZON_YEARS] = [0.12, 0.22, 0.34, 0.47, 0.61, 0.72];
const OPTIMISTIC_GROWTH: [f64; HORIZON_YEARS] = [0.18, 0.34, 0.52, 0.71, 0.90, 1.05];

impl Default for Calibration {
    fn default() -> Self {
        let entry = |mean_value, std_dev_value, mean_retention, growth_factors| ScenarioCalibration {
            parameters: ScenarioParameters {
                mean_value,
                std_dev_value,
                mean_retention,
            },
            growth_factors,
        };

        let mut scenarios = BTreeMap::new();
        scenarios.insert(ScenarioKey::All, entry(90.0, 15.0, 0.76, BASE_GROWTH));
        scenarios.insert(
            ScenarioKey::Conservative,
            entry(75.0, 10.0, 0.70, CONSERVATIVE_GROWTH),
        );
        scenarios.insert(ScenarioKey::Base, entry(90.0, 13.5, 0.76, BASE_GROWTH));
        scenarios.insert(
            ScenarioKey::Optimistic,
            entry(110.0, 16.0, 0.82, OPTIMISTIC_GROWTH),
        );

        Self {
            scenarios,
            comparison: default_comparison_rows(),
        }
    }
}

pub(crate) fn default_comparison_rows() -> Vec<ScenarioRow> {
    let row = |name: &str, target_value, predicted_value, probability_percent, color: &str| {
        ScenarioRow {
            name: name.to_string(),
            target_value,
            predicted_value,
            probability_percent,
            simulation_count: 10_000,
            display_color: color.to_string(),
        }
    };
    vec![
        row("Conservative", 75.0, 74.2, 82.5, "#f59e0b"),
        row("Base", 90.0, 89.4, 68.3, "#3b82f6"),
        row("Optimistic", 110.0, 108.7, 41.7, "#10b981"),
    ]
}

/// Sampling invariants: a finite mean, a strictly positive finite spread and a
/// retention mean inside `[0, 1]`. A non-positive spread would flip the sign
/// of the value/retention correlation.
pub(crate) fn check_parameters(key: ScenarioKey, p: &ScenarioParameters) -> Result<()> {
    if !p.mean_value.is_finite() {
        return Err(EngineError::InvalidCalibration(format!(
            "{key}: meanValue must be finite"
        )));
    }
    if !(p.std_dev_value.is_finite() && p.std_dev_value > 0.0) {
        return Err(EngineError::InvalidCalibration(format!(
            "{key}: stdDevValue must be > 0"
        )));
    }
    if !(0.0..=1.0).contains(&p.mean_retention) {
        return Err(EngineError::InvalidCalibration(format!(
            "{key}: meanRetention must be between 0 and 1"
        )));
    }
    Ok(())
}

impl Calibration {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let calibration: Calibration = serde_json::from_str(json)?;
        calibration.validate()?;
        Ok(calibration)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| EngineError::CalibrationIo {
            path: path.to_path_buf(),
            source,
        })?;
        let calibration = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "loaded calibration");
        Ok(calibration)
    }

    pub fn scenario(&self, key: ScenarioKey) -> Result<&ScenarioCalibration> {
        self.scenarios
            .get(&key)
            .ok_or_else(|| EngineError::UnknownScenario(key.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        for key in ScenarioKey::ALL_KEYS {
            let Some(entry) = self.scenarios.get(&key) else {
                return Err(EngineError::InvalidCalibration(format!(
                    "missing scenario `{key}`"
                )));
            };
            check_parameters(key, &entry.parameters)?;
            if entry.growth_factors.iter().any(|f| !f.is_finite()) {
                return Err(EngineError::InvalidCalibration(format!(
                    "{key}: growthFactors must be finite"
                )));
            }
        }

        if self.comparison.len() != 3 {
            return Err(EngineError::InvalidCalibration(format!(
                "comparison table must have 3 rows, found {}",
                self.comparison.len()
            )));
        }

        Ok(())
    }
}
