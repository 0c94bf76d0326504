//! Z-score anomaly scoring
//!
//! Scores every point of a series by its absolute deviation from the
//! population mean in standard deviations, and flags the points scoring
//! strictly above the caller-supplied threshold.

use crate::error::{require_min_len, EngineError};

/// Minimum series length for anomaly detection
pub const MIN_SAMPLES: usize = 3;

/// Anomaly scan output
#[derive(Debug, Clone)]
pub struct AnomalyReport {
    /// Indices of flagged points, strictly increasing
    pub indices: Vec<usize>,
    /// One z-score per input point
    pub scores: Vec<f64>,
}

/// Score a series and flag outliers above `threshold`
pub fn detect_anomalies(series: &[f64], threshold: f64) -> Result<AnomalyReport, EngineError> {
    require_min_len(series, MIN_SAMPLES)?;

    let mean = series.iter().sum::<f64>() / series.len() as f64;
    let variance = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / series.len() as f64;
    let std_dev = variance.sqrt();

    // Constant series carries no deviation signal; every score is zero
    if std_dev < f64::EPSILON {
        return Ok(AnomalyReport {
            indices: Vec::new(),
            scores: vec![0.0; series.len()],
        });
    }

    let scores: Vec<f64> = series.iter().map(|v| (v - mean).abs() / std_dev).collect();
    let indices: Vec<usize> = scores
        .iter()
        .enumerate()
        .filter(|(_, z)| **z > threshold)
        .map(|(i, _)| i)
        .collect();

    Ok(AnomalyReport { indices, scores })
}
