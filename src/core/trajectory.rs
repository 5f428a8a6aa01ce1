use super::calibration::Calibration;
use super::error::Result;
use super::types::{ScenarioKey, SummaryStatistics, TrajectoryPoint, round1};

pub const FIRST_PROJECTED_YEAR: u32 = 2026;

/// Upper band multiplier on top of the growth factor.
const P90_SPREAD: f64 = 1.05;
/// Lower band multiplier on top of the growth factor.
const P10_SPREAD: f64 = 0.95;

/// Projects the summary percentiles over 2026..=2031 using the scenario's
/// growth curve.
///
/// The 1.05 / 0.95 band spread is a display approximation that widens the
/// band in proportion to the growth factor. It is not a derived confidence
/// interval.
pub fn project_trajectory(
    scenario: ScenarioKey,
    calibration: &Calibration,
    stats: &SummaryStatistics,
) -> Result<Vec<TrajectoryPoint>> {
    let factors = calibration.scenario(scenario)?.growth_factors;

    Ok(factors
        .iter()
        .zip(FIRST_PROJECTED_YEAR..)
        .map(|(&factor, year)| TrajectoryPoint {
            year,
            expected: round1(stats.median * factor),
            p10: round1(stats.p10 * factor * P10_SPREAD),
            p90: round1(stats.p90 * factor * P90_SPREAD),
        })
        .collect())
}
