//! Energy consumption forecasting
//!
//! Uses the loaded model when available, otherwise an exponential-smoothing
//! recurrence seeded from the last observation. A model failure degrades to
//! a mean forecast instead of surfacing an error.

use crate::error::{require_min_len, EngineError};
use crate::predictor::ModelHandle;
use tracing::warn;

/// Smoothing factor for the fallback recurrence
pub const SMOOTHING_ALPHA: f64 = 0.3;

/// Minimum series length for forecasting
pub const MIN_SAMPLES: usize = 2;

/// Which path produced a forecast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastSource {
    /// Loaded model produced the predictions
    Model,
    /// Exponential smoothing, no model loaded
    Smoothing,
    /// Mean forecast after a model failure
    MeanFallback,
}

impl ForecastSource {
    /// Coarse provenance signal, not a calibrated probability
    pub fn confidence(&self) -> f64 {
        match self {
            ForecastSource::Model => 0.9,
            ForecastSource::Smoothing => 0.6,
            ForecastSource::MeanFallback => 0.5,
        }
    }
}

/// Forecast output
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Exactly `horizon` future values
    pub predictions: Vec<f64>,
    pub source: ForecastSource,
}

/// Produce `horizon` future values from a historical series
///
/// A horizon of 0 yields an empty prediction sequence; the source (and thus
/// the confidence) is still determined by which path would have run.
pub fn forecast(
    model: &ModelHandle,
    series: &[f64],
    horizon: usize,
) -> Result<Forecast, EngineError> {
    require_min_len(series, MIN_SAMPLES)?;
    let mean = series.iter().sum::<f64>() / series.len() as f64;

    if model.is_available() {
        match model.predict(series) {
            Ok(values) if values.len() >= horizon => {
                return Ok(Forecast {
                    predictions: values[..horizon].to_vec(),
                    source: ForecastSource::Model,
                });
            }
            // A model that cannot fill the horizon counts as a failed call;
            // padding its output would misreport provenance.
            Ok(values) => {
                warn!(
                    produced = values.len(),
                    requested = horizon,
                    "Model returned fewer values than requested, degrading to mean forecast"
                );
            }
            Err(err) => {
                warn!(error = %err, "Model prediction failed, degrading to mean forecast");
            }
        }
        return Ok(Forecast {
            predictions: vec![mean; horizon],
            source: ForecastSource::MeanFallback,
        });
    }

    // next = alpha * prev + (1 - alpha) * mean, seeded from the last
    // observation. Repeated application pulls the forecast toward the mean.
    let mut predictions = Vec::with_capacity(horizon);
    let mut prev = series[series.len() - 1];
    for _ in 0..horizon {
        let predicted = SMOOTHING_ALPHA * prev + (1.0 - SMOOTHING_ALPHA) * mean;
        predictions.push(predicted);
        prev = predicted;
    }

    Ok(Forecast {
        predictions,
        source: ForecastSource::Smoothing,
    })
}
