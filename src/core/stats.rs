use super::error::{EngineError, Result};
use super::types::{Sample, SummaryStatistics};

/// Value above which a sample counts toward `above_80_fraction`.
const HIGH_WATER_VALUE: f64 = 80.0;
/// Retention above which a sample counts toward `retention_above_75_fraction`.
const RETENTION_THRESHOLD: f64 = 0.75;

pub fn compute_statistics(population: &[Sample]) -> Result<SummaryStatistics> {
    if population.is_empty() {
        return Err(EngineError::EmptyPopulation);
    }

    let n = population.len() as f64;
    let mut values: Vec<f64> = population.iter().map(|s| s.value).collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    let mean_retention = population.iter().map(|s| s.retention).sum::<f64>() / n;

    let stats = SummaryStatistics {
        sample_count: population.len(),
        mean,
        std_dev: variance.sqrt(),
        median: percentile(&values, 0.5),
        p10: percentile(&values, 0.1),
        p90: percentile(&values, 0.9),
        min: values[0],
        max: values[values.len() - 1],
        positive_fraction: fraction_where(population, |s| s.value > 0.0),
        above_80_fraction: fraction_where(population, |s| s.value > HIGH_WATER_VALUE),
        avg_retention_pct: mean_retention * 100.0,
        retention_above_75_fraction: fraction_where(population, |s| {
            s.retention > RETENTION_THRESHOLD
        }),
    };

    tracing::debug!(
        samples = stats.sample_count,
        median = stats.median,
        p10 = stats.p10,
        p90 = stats.p90,
        "computed summary statistics"
    );
    Ok(stats)
}

fn fraction_where(population: &[Sample], pred: impl Fn(&Sample) -> bool) -> f64 {
    population.iter().filter(|s| pred(s)).count() as f64 / population.len() as f64
}

/// Nearest-rank percentile with floor truncation: the element at
/// `floor(fraction * len)` of the ascending slice. No interpolation.
pub fn percentile(sorted: &[f64], fraction: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let idx = ((fraction * sorted.len() as f64).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}
