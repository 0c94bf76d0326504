//! Descriptive series statistics

use crate::error::{require_min_len, EngineError};

/// Summary statistics for a series
#[derive(Debug, Clone)]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub p25: f64,
    pub p75: f64,
}

/// Compute summary statistics over a non-empty series
pub fn compute_statistics(series: &[f64]) -> Result<SeriesSummary, EngineError> {
    require_min_len(series, 1)?;

    let count = series.len();
    let mean = series.iter().sum::<f64>() / count as f64;
    let variance = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(SeriesSummary {
        count,
        mean,
        median: percentile(&sorted, 50.0),
        std: variance.sqrt(),
        min: sorted[0],
        max: sorted[count - 1],
        p25: percentile(&sorted, 25.0),
        p75: percentile(&sorted, 75.0),
    })
}

/// Linear-interpolation percentile over a pre-sorted, non-empty slice
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let rank = (p / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let weight = rank - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}
