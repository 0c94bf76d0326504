//! Prediction and scoring engines
//!
//! This module provides:
//! - Forecasting with model-vs-fallback branching
//! - Z-score based anomaly scoring
//! - Descriptive statistics over a series
//!
//! Each engine is a pure function of its inputs (plus the read-only model
//! handle for forecasting), so requests parallelize with no coordination.

mod anomaly;
mod forecast;
mod stats;

pub use anomaly::{detect_anomalies, AnomalyReport};
pub use forecast::{forecast, Forecast, ForecastSource, SMOOTHING_ALPHA};
pub use stats::{compute_statistics, SeriesSummary};
