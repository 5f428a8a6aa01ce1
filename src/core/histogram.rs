use super::error::{EngineError, Result};
use super::types::{HistogramBin, Sample, SummaryStatistics};

pub const DEFAULT_BIN_COUNT: usize = 40;

/// Normalizes the value distribution into `bin_count` equal-width bins over
/// `[stats.min, stats.max]`. Empty bins are left out of the result.
pub fn build_histogram(
    population: &[Sample],
    stats: &SummaryStatistics,
    bin_count: usize,
) -> Result<Vec<HistogramBin>> {
    if bin_count == 0 {
        return Err(EngineError::InvalidBinCount);
    }
    if population.is_empty() {
        return Err(EngineError::EmptyPopulation);
    }
    if stats.max == stats.min {
        return Err(EngineError::DegenerateRange { value: stats.min });
    }

    let width = (stats.max - stats.min) / bin_count as f64;
    let mut counts = vec![0_usize; bin_count];
    for sample in population {
        let raw = ((sample.value - stats.min) / width).floor();
        // The maximum lands exactly on the upper edge; fold it into the last bin.
        let index = (raw.max(0.0) as usize).min(bin_count - 1);
        counts[index] += 1;
    }

    let n = population.len() as f64;
    let bins: Vec<HistogramBin> = counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(index, &count)| HistogramBin {
            center: stats.min + (index as f64 + 0.5) * width,
            probability_percent: 100.0 * count as f64 / n,
        })
        .collect();

    tracing::debug!(bin_count, occupied = bins.len(), width, "built histogram");
    Ok(bins)
}
