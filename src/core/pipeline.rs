use super::calibration::Calibration;
use super::error::{EngineError, Result};
use super::histogram::{DEFAULT_BIN_COUNT, build_histogram};
use super::risk::{DEFAULT_SCATTER_PREFIX, classify_scatter};
use super::sampler::generate_population;
use super::stats::compute_statistics;
use super::trajectory::project_trajectory;
use super::types::{Analysis, HistogramBin, ScenarioKey};

/// One full recompute pass for a scenario selection. Nothing is cached
/// between calls; each call samples its own population.
pub fn run_analysis(
    scenario: ScenarioKey,
    calibration: &Calibration,
    seed: u64,
) -> Result<Analysis> {
    let span = tracing::debug_span!("analysis", %scenario, seed);
    let _guard = span.enter();

    // Resolve the scenario up front so a bad selector costs no sampling.
    calibration.scenario(scenario)?;

    let population = generate_population(scenario, calibration, seed)?;
    let statistics = compute_statistics(&population)?;
    let histogram = match build_histogram(&population, &statistics, DEFAULT_BIN_COUNT) {
        Ok(bins) => bins,
        Err(EngineError::DegenerateRange { value }) => {
            tracing::warn!(value, "all samples identical; reporting a single histogram bin");
            vec![HistogramBin {
                center: value,
                probability_percent: 100.0,
            }]
        }
        Err(e) => return Err(e),
    };
    let trajectory = project_trajectory(scenario, calibration, &statistics)?;
    let scatter = classify_scatter(&population, DEFAULT_SCATTER_PREFIX);

    Ok(Analysis {
        scenario,
        seed,
        statistics,
        histogram,
        trajectory,
        scatter,
    })
}

/// Parses the selector and runs [`run_analysis`].
pub fn run_analysis_str(
    scenario: &str,
    calibration: &Calibration,
    seed: u64,
) -> Result<Analysis> {
    run_analysis(scenario.parse()?, calibration, seed)
}
