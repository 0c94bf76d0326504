//! Observability infrastructure for the inference service
//!
//! Provides:
//! - Prometheus metrics (per-engine latency, request counters, model info)
//! - Structured JSON logging with tracing

use prometheus::{
    register_gauge_vec, register_histogram, register_int_gauge, GaugeVec, Histogram, IntGauge,
};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Default histogram buckets for latency measurements (in seconds)
const LATENCY_BUCKETS: &[f64] = &[
    0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<EngineMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct EngineMetricsInner {
    forecast_latency_seconds: Histogram,
    anomaly_latency_seconds: Histogram,
    statistics_latency_seconds: Histogram,
    forecasts_generated: IntGauge,
    anomalies_detected: IntGauge,
    statistics_computed: IntGauge,
    request_errors: IntGauge,
    model_info: GaugeVec,
}

impl EngineMetricsInner {
    fn new() -> Self {
        Self {
            forecast_latency_seconds: register_histogram!(
                "eis_forecast_latency_seconds",
                "Time spent producing a forecast",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register forecast_latency_seconds"),

            anomaly_latency_seconds: register_histogram!(
                "eis_anomaly_latency_seconds",
                "Time spent scoring a series for anomalies",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register anomaly_latency_seconds"),

            statistics_latency_seconds: register_histogram!(
                "eis_statistics_latency_seconds",
                "Time spent computing series statistics",
                LATENCY_BUCKETS.to_vec()
            )
            .expect("Failed to register statistics_latency_seconds"),

            forecasts_generated: register_int_gauge!(
                "eis_forecasts_generated_total",
                "Total number of forecasts generated"
            )
            .expect("Failed to register forecasts_generated"),

            anomalies_detected: register_int_gauge!(
                "eis_anomalies_detected_total",
                "Total number of anomalous points flagged"
            )
            .expect("Failed to register anomalies_detected"),

            statistics_computed: register_int_gauge!(
                "eis_statistics_computed_total",
                "Total number of statistics requests served"
            )
            .expect("Failed to register statistics_computed"),

            request_errors: register_int_gauge!(
                "eis_request_errors_total",
                "Total number of requests that failed validation or computation"
            )
            .expect("Failed to register request_errors"),

            model_info: register_gauge_vec!(
                "eis_model_info",
                "Information about the currently loaded predictive model",
                &["version", "path"]
            )
            .expect("Failed to register model_info"),
        }
    }
}

/// Engine metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct EngineMetrics {
    _private: (),
}

impl Default for EngineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(EngineMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &EngineMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    pub fn observe_forecast_latency(&self, duration_secs: f64) {
        self.inner().forecast_latency_seconds.observe(duration_secs);
    }

    pub fn observe_anomaly_latency(&self, duration_secs: f64) {
        self.inner().anomaly_latency_seconds.observe(duration_secs);
    }

    pub fn observe_statistics_latency(&self, duration_secs: f64) {
        self.inner()
            .statistics_latency_seconds
            .observe(duration_secs);
    }

    pub fn inc_forecasts_generated(&self) {
        self.inner().forecasts_generated.inc();
    }

    /// Add the number of points flagged by an anomaly scan
    pub fn add_anomalies_detected(&self, count: i64) {
        self.inner().anomalies_detected.add(count);
    }

    pub fn inc_statistics_computed(&self) {
        self.inner().statistics_computed.inc();
    }

    pub fn inc_request_errors(&self) {
        self.inner().request_errors.inc();
    }

    /// Update model info labels
    pub fn set_model_info(&self, version: &str, path: &str) {
        self.inner().model_info.reset();
        self.inner()
            .model_info
            .with_label_values(&[version, path])
            .set(1.0);
    }
}

/// Structured logger for service events
///
/// Provides consistent JSON-formatted logging for startup, shutdown,
/// and per-request engine outcomes.
#[derive(Clone)]
pub struct StructuredLogger {
    service: String,
}

impl StructuredLogger {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    /// Log service startup
    pub fn log_startup(&self, version: &str, model_loaded: bool) {
        info!(
            event = "startup",
            service = %self.service,
            version = %version,
            model_loaded = model_loaded,
            "Service started"
        );
    }

    /// Log service shutdown
    pub fn log_shutdown(&self, reason: &str) {
        info!(
            event = "shutdown",
            service = %self.service,
            reason = %reason,
            "Service shutting down"
        );
    }

    /// Log a generated forecast
    pub fn log_forecast(&self, machine_id: &str, horizon: usize, confidence: f64) {
        info!(
            event = "forecast_generated",
            service = %self.service,
            machine_id = %machine_id,
            horizon = horizon,
            confidence = confidence,
            "Generated forecast"
        );
    }

    /// Log an anomaly scan result
    pub fn log_anomaly_scan(&self, machine_id: &str, scanned: usize, flagged: usize) {
        if flagged > 0 {
            warn!(
                event = "anomalies_flagged",
                service = %self.service,
                machine_id = %machine_id,
                scanned = scanned,
                flagged = flagged,
                "Anomalous points flagged"
            );
        } else {
            info!(
                event = "anomaly_scan_clean",
                service = %self.service,
                machine_id = %machine_id,
                scanned = scanned,
                "No anomalies flagged"
            );
        }
    }
}
