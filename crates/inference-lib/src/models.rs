//! Wire models for the energy inference service

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// RFC 3339 UTC timestamp used to stamp responses
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339()
}

/// Request for energy consumption prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub machine_id: String,
    /// Ordered historical readings, oldest first
    pub historical_data: Vec<f64>,
    /// Number of future periods to forecast
    #[serde(default = "default_future_periods")]
    pub future_periods: usize,
}

/// Forecast response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub machine_id: String,
    pub predictions: Vec<f64>,
    /// Provenance signal: 0.9 model, 0.6 smoothing fallback, 0.5 degraded
    pub confidence: f64,
    pub timestamp: String,
}

/// Request for anomaly detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyRequest {
    pub machine_id: String,
    /// Ordered readings to scan
    pub data: Vec<f64>,
    /// Z-score threshold; points scoring strictly above are flagged
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

/// Anomaly detection response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyResponse {
    pub machine_id: String,
    /// Indices into the input series, strictly increasing
    pub anomalies: Vec<usize>,
    /// One z-score per input point
    pub anomaly_scores: Vec<f64>,
    pub timestamp: String,
}

/// Descriptive statistics response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub quartile_25: f64,
    pub quartile_75: f64,
    pub timestamp: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub model_loaded: bool,
}

/// Static capability descriptor for the loaded model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfoResponse {
    pub model_loaded: bool,
    pub model_path: String,
    pub version: String,
    pub timestamp: String,
    pub capabilities: Vec<String>,
}

/// Service descriptor returned at the root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    pub endpoints: BTreeMap<String, String>,
}

fn default_future_periods() -> usize {
    24
}

fn default_threshold() -> f64 {
    2.0
}
