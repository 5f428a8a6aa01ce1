mod calibration;
mod error;
mod histogram;
mod pipeline;
mod risk;
mod rng;
mod sampler;
mod scenarios;
mod stats;
mod trajectory;
mod types;

pub use calibration::{Calibration, ScenarioCalibration};
pub use error::{EngineError, Result};
pub use histogram::{DEFAULT_BIN_COUNT, build_histogram};
pub use pipeline::{run_analysis, run_analysis_str};
pub use risk::{DEFAULT_SCATTER_PREFIX, classify_scatter, risk_tier};
pub use sampler::{FLOOR_VALUE, MAX_RETENTION, MIN_RETENTION, generate_population};
pub use scenarios::{default_scenario_table, scenario_table};
pub use stats::{compute_statistics, percentile};
pub use trajectory::{FIRST_PROJECTED_YEAR, project_trajectory};
pub use types::{
    Analysis, HORIZON_YEARS, HistogramBin, POPULATION_SIZE, Population, RiskTier, Sample,
    ScatterPoint, ScenarioKey, ScenarioParameters, ScenarioRow, SummaryStatistics,
    TrajectoryPoint,
};
