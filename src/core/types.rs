use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Number of samples drawn for every scenario evaluation.
pub const POPULATION_SIZE: usize = 10_000;

/// Number of projected years (2026 through 2031).
pub const HORIZON_YEARS: usize = 6;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKey {
    All,
    Conservative,
    Base,
    Optimistic,
}

impl ScenarioKey {
    pub const ALL_KEYS: [ScenarioKey; 4] = [
        ScenarioKey::All,
        ScenarioKey::Conservative,
        ScenarioKey::Base,
        ScenarioKey::Optimistic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKey::All => "all",
            ScenarioKey::Conservative => "conservative",
            ScenarioKey::Base => "base",
            ScenarioKey::Optimistic => "optimistic",
        }
    }

    /// Stable per-scenario salt mixed into the sampling seed.
    pub(crate) fn ordinal(self) -> u64 {
        match self {
            ScenarioKey::All => 0,
            ScenarioKey::Conservative => 1,
            ScenarioKey::Base => 2,
            ScenarioKey::Optimistic => 3,
        }
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(ScenarioKey::All),
            "conservative" => Ok(ScenarioKey::Conservative),
            "base" => Ok(ScenarioKey::Base),
            "optimistic" => Ok(ScenarioKey::Optimistic),
            other => Err(EngineError::UnknownScenario(other.to_string())),
        }
    }
}

/// Distribution parameters for one scenario.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParameters {
    pub mean_value: f64,
    pub std_dev_value: f64,
    pub mean_retention: f64,
}

/// One correlated draw: a value outcome and the retention rate that came with it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Sample {
    pub value: f64,
    pub retention: f64,
}

/// Samples in generation order.
pub type Population = Vec<Sample>;

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStatistics {
    pub sample_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
    pub min: f64,
    pub max: f64,
    pub positive_fraction: f64,
    pub above_80_fraction: f64,
    pub avg_retention_pct: f64,
    pub retention_above_75_fraction: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBin {
    pub center: f64,
    pub probability_percent: f64,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrajectoryPoint {
    pub year: u32,
    pub expected: f64,
    pub p10: f64,
    pub p90: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScatterPoint {
    pub market_share_percent: f64,
    pub value: f64,
    pub risk_tier: RiskTier,
}

/// Static comparison row shown next to the simulated results.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRow {
    pub name: String,
    pub target_value: f64,
    pub predicted_value: f64,
    pub probability_percent: f64,
    pub simulation_count: u32,
    pub display_color: String,
}

/// Everything one scenario selection produces.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub scenario: ScenarioKey,
    pub seed: u64,
    pub statistics: SummaryStatistics,
    pub histogram: Vec<HistogramBin>,
    pub trajectory: Vec<TrajectoryPoint>,
    pub scatter: Vec<ScatterPoint>,
}

/// Rounds half away from zero to one decimal place.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
