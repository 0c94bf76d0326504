//! HTTP API for the energy inference service

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use inference_lib::{
    engine,
    models::{
        timestamp_now, AnomalyRequest, AnomalyResponse, HealthResponse, ModelInfoResponse,
        PredictionRequest, PredictionResponse, ServiceInfo, StatisticsResponse,
    },
    EngineError, EngineMetrics, ModelHandle, StructuredLogger,
};
use prometheus::{Encoder, TextEncoder};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

pub const SERVICE_NAME: &str = "Energy Inference Service";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub model: ModelHandle,
    pub model_path: String,
    pub metrics: EngineMetrics,
    pub logger: StructuredLogger,
}

impl AppState {
    pub fn new(
        model: ModelHandle,
        model_path: String,
        metrics: EngineMetrics,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            model,
            model_path,
            metrics,
            logger,
        }
    }

    fn track_error(&self, err: EngineError) -> ApiError {
        self.metrics.inc_request_errors();
        ApiError(err)
    }
}

/// Maps engine failures to HTTP responses: validation errors are client
/// errors with a precise message; anything else is a generic server error.
struct ApiError(EngineError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            EngineError::InsufficientData { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            EngineError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal computation error".to_string(),
            ),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Service descriptor and endpoint map
async fn root() -> Json<ServiceInfo> {
    let endpoints: BTreeMap<String, String> = [
        ("health", "/health"),
        ("predict", "/predict"),
        ("anomalies", "/anomalies"),
        ("statistics", "/statistics"),
        ("model_info", "/model-info"),
        ("metrics", "/metrics"),
    ]
    .into_iter()
    .map(|(name, path)| (name.to_string(), path.to_string()))
    .collect();

    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        status: "active".to_string(),
        endpoints,
    })
}

/// Health check - the process is healthy whenever it can serve; model
/// absence is reported separately so callers can see fallback-only mode
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: timestamp_now(),
        model_loaded: state.model.is_available(),
    })
}

/// Forecast future energy consumption
async fn predict(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let start = Instant::now();

    let forecast = engine::forecast(&state.model, &request.historical_data, request.future_periods)
        .map_err(|e| state.track_error(e))?;

    state
        .metrics
        .observe_forecast_latency(start.elapsed().as_secs_f64());
    state.metrics.inc_forecasts_generated();
    state.logger.log_forecast(
        &request.machine_id,
        request.future_periods,
        forecast.source.confidence(),
    );

    Ok(Json(PredictionResponse {
        machine_id: request.machine_id,
        predictions: forecast.predictions,
        confidence: forecast.source.confidence(),
        timestamp: timestamp_now(),
    }))
}

/// Detect anomalous readings via z-score
async fn anomalies(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnomalyRequest>,
) -> Result<Json<AnomalyResponse>, ApiError> {
    let start = Instant::now();

    let report = engine::detect_anomalies(&request.data, request.threshold)
        .map_err(|e| state.track_error(e))?;

    state
        .metrics
        .observe_anomaly_latency(start.elapsed().as_secs_f64());
    state
        .metrics
        .add_anomalies_detected(report.indices.len() as i64);
    state
        .logger
        .log_anomaly_scan(&request.machine_id, request.data.len(), report.indices.len());

    Ok(Json(AnomalyResponse {
        machine_id: request.machine_id,
        anomalies: report.indices,
        anomaly_scores: report.scores,
        timestamp: timestamp_now(),
    }))
}

/// Compute descriptive statistics over a bare series
async fn statistics(
    State(state): State<Arc<AppState>>,
    Json(data): Json<Vec<f64>>,
) -> Result<Json<StatisticsResponse>, ApiError> {
    let start = Instant::now();

    let summary = engine::compute_statistics(&data).map_err(|e| state.track_error(e))?;

    state
        .metrics
        .observe_statistics_latency(start.elapsed().as_secs_f64());
    state.metrics.inc_statistics_computed();

    Ok(Json(StatisticsResponse {
        count: summary.count,
        mean: summary.mean,
        median: summary.median,
        std: summary.std,
        min: summary.min,
        max: summary.max,
        quartile_25: summary.p25,
        quartile_75: summary.p75,
        timestamp: timestamp_now(),
    }))
}

/// Static capability descriptor for the loaded model
async fn model_info(State(state): State<Arc<AppState>>) -> Json<ModelInfoResponse> {
    Json(ModelInfoResponse {
        model_loaded: state.model.is_available(),
        model_path: state.model_path.clone(),
        version: SERVICE_VERSION.to_string(),
        timestamp: timestamp_now(),
        capabilities: vec![
            "energy_prediction".to_string(),
            "anomaly_detection".to_string(),
            "statistics".to_string(),
            "health_check".to_string(),
        ],
    })
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .route("/anomalies", post(anomalies))
        .route("/statistics", post(statistics))
        .route("/model-info", get(model_info))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
