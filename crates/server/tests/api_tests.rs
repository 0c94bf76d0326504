//! Integration tests for the server API endpoints

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use inference_lib::{EngineMetrics, Model, ModelError, ModelHandle, StructuredLogger};
use inference_server::api::{self, AppState};
use std::sync::Arc;
use tower::ServiceExt;

struct FixedModel(Vec<f64>);

impl Model for FixedModel {
    fn predict(&self, _series: &[f64]) -> Result<Vec<f64>, ModelError> {
        Ok(self.0.clone())
    }
}

struct FailingModel;

impl Model for FailingModel {
    fn predict(&self, _series: &[f64]) -> Result<Vec<f64>, ModelError> {
        Err(ModelError::Inference("artifact rejected input".to_string()))
    }
}

fn setup_test_app(model: ModelHandle) -> Router {
    let state = Arc::new(AppState::new(
        model,
        "model.onnx".to_string(),
        EngineMetrics::new(),
        StructuredLogger::new("test"),
    ));
    api::create_router(state)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn post_json(
    app: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_reports_fallback_mode() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, health) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["model_loaded"], false);
    assert!(health["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_reports_loaded_model() {
    let app = setup_test_app(ModelHandle::new(Arc::new(FixedModel(vec![1.0]))));

    let (status, health) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["model_loaded"], true);
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, info) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["status"], "active");
    assert_eq!(info["endpoints"]["predict"], "/predict");
    assert_eq!(info["endpoints"]["anomalies"], "/anomalies");
    assert_eq!(info["endpoints"]["statistics"], "/statistics");
}

#[tokio::test]
async fn test_predict_fallback_smoothing() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, body) = post_json(
        app,
        "/predict",
        serde_json::json!({
            "machine_id": "press-1",
            "historical_data": [10.0, 10.0, 10.0],
            "future_periods": 3
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["machine_id"], "press-1");
    assert_eq!(body["predictions"].as_array().unwrap().len(), 3);
    assert!((body["confidence"].as_f64().unwrap() - 0.6).abs() < 1e-9);
    // Constant history: the smoothing recurrence stays on the mean
    for p in body["predictions"].as_array().unwrap() {
        assert!((p.as_f64().unwrap() - 10.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_predict_defaults_to_24_periods() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, body) = post_json(
        app,
        "/predict",
        serde_json::json!({
            "machine_id": "press-1",
            "historical_data": [1.0, 2.0, 3.0]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predictions"].as_array().unwrap().len(), 24);
}

#[tokio::test]
async fn test_predict_rejects_short_series() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, body) = post_json(
        app,
        "/predict",
        serde_json::json!({
            "machine_id": "press-1",
            "historical_data": [42.0]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("at least 2 data points"));
}

#[tokio::test]
async fn test_predict_uses_model_when_available() {
    let values: Vec<f64> = (0..30).map(|i| i as f64).collect();
    let app = setup_test_app(ModelHandle::new(Arc::new(FixedModel(values))));

    let (status, body) = post_json(
        app,
        "/predict",
        serde_json::json!({
            "machine_id": "press-1",
            "historical_data": [1.0, 2.0, 3.0],
            "future_periods": 5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((body["confidence"].as_f64().unwrap() - 0.9).abs() < 1e-9);
    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions.len(), 5);
    assert!((predictions[4].as_f64().unwrap() - 4.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_predict_degrades_when_model_fails() {
    let app = setup_test_app(ModelHandle::new(Arc::new(FailingModel)));

    let (status, body) = post_json(
        app,
        "/predict",
        serde_json::json!({
            "machine_id": "press-1",
            "historical_data": [2.0, 4.0, 6.0],
            "future_periods": 4
        }),
    )
    .await;

    // A failing model is never an error response
    assert_eq!(status, StatusCode::OK);
    assert!((body["confidence"].as_f64().unwrap() - 0.5).abs() < 1e-9);
    for p in body["predictions"].as_array().unwrap() {
        assert!((p.as_f64().unwrap() - 4.0).abs() < 1e-9);
    }
}

#[tokio::test]
async fn test_anomalies_rejects_short_series() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, body) = post_json(
        app,
        "/anomalies",
        serde_json::json!({
            "machine_id": "press-1",
            "data": [1.0, 2.0]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("at least 3 data points"));
}

#[tokio::test]
async fn test_anomalies_flags_outlier() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, body) = post_json(
        app,
        "/anomalies",
        serde_json::json!({
            "machine_id": "press-1",
            "data": [1.0, 1.0, 1.0, 1.0, 100.0],
            "threshold": 1.9
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["anomalies"].as_array().unwrap().len(), 1);
    assert_eq!(body["anomalies"][0], 4);
    assert_eq!(body["anomaly_scores"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_anomalies_constant_series_is_clean() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, body) = post_json(
        app,
        "/anomalies",
        serde_json::json!({
            "machine_id": "press-1",
            "data": [7.0, 7.0, 7.0, 7.0]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["anomalies"].as_array().unwrap().is_empty());
    for score in body["anomaly_scores"].as_array().unwrap() {
        assert_eq!(score.as_f64().unwrap(), 0.0);
    }
}

#[tokio::test]
async fn test_statistics_known_series() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, body) = post_json(
        app,
        "/statistics",
        serde_json::json!([1.0, 2.0, 3.0, 4.0, 5.0]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);
    assert!((body["mean"].as_f64().unwrap() - 3.0).abs() < 1e-9);
    assert!((body["median"].as_f64().unwrap() - 3.0).abs() < 1e-9);
    assert!((body["min"].as_f64().unwrap() - 1.0).abs() < 1e-9);
    assert!((body["max"].as_f64().unwrap() - 5.0).abs() < 1e-9);
    assert!((body["quartile_25"].as_f64().unwrap() - 2.0).abs() < 1e-9);
    assert!((body["quartile_75"].as_f64().unwrap() - 4.0).abs() < 1e-9);
    assert!((body["std"].as_f64().unwrap() - 2.0_f64.sqrt()).abs() < 1e-9);
}

#[tokio::test]
async fn test_statistics_rejects_empty_series() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, body) = post_json(app, "/statistics", serde_json::json!([])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("at least 1 data points"));
}

#[tokio::test]
async fn test_model_info_shape() {
    let app = setup_test_app(ModelHandle::absent());

    let (status, info) = get_json(app, "/model-info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["model_loaded"], false);
    assert_eq!(info["model_path"], "model.onnx");
    let capabilities = info["capabilities"].as_array().unwrap();
    assert!(capabilities.contains(&serde_json::json!("energy_prediction")));
    assert!(capabilities.contains(&serde_json::json!("anomaly_detection")));
    assert!(capabilities.contains(&serde_json::json!("statistics")));
}

#[tokio::test]
async fn test_metrics_exposition() {
    let app = setup_test_app(ModelHandle::absent());

    // Serve one forecast so the counters move
    let _ = post_json(
        app.clone(),
        "/predict",
        serde_json::json!({
            "machine_id": "press-1",
            "historical_data": [1.0, 2.0, 3.0]
        }),
    )
    .await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    assert!(text.contains("eis_forecast_latency_seconds"));
    assert!(text.contains("eis_forecasts_generated_total"));
    assert!(text.contains("eis_request_errors_total"));
}
