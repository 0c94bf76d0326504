//! Forecast, anomaly, and statistics commands

use crate::client::{
    AnomalyRequest, AnomalyResponse, ApiClient, PredictionRequest, PredictionResponse,
    StatisticsResponse,
};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use tabled::Tabled;

#[derive(Tabled)]
struct PredictionRow {
    #[tabled(rename = "Period")]
    period: usize,
    #[tabled(rename = "Predicted")]
    predicted: String,
}

#[derive(Tabled)]
struct AnomalyRow {
    #[tabled(rename = "Index")]
    index: usize,
    #[tabled(rename = "Reading")]
    reading: String,
    #[tabled(rename = "Z-Score")]
    score: String,
    #[tabled(rename = "Flagged")]
    flagged: String,
}

#[derive(Tabled)]
struct StatRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Request a forecast and print it
pub async fn predict(
    client: &ApiClient,
    machine_id: &str,
    series: Vec<f64>,
    periods: usize,
    format: OutputFormat,
) -> Result<()> {
    let request = PredictionRequest {
        machine_id: machine_id.to_string(),
        historical_data: series,
        future_periods: periods,
    };
    let response: PredictionResponse = client.post("/predict", &request).await?;

    match format {
        OutputFormat::Json => {
            output::print_json(&response)?;
        }
        OutputFormat::Table => {
            let rows: Vec<PredictionRow> = response
                .predictions
                .iter()
                .enumerate()
                .map(|(i, p)| PredictionRow {
                    period: i + 1,
                    predicted: output::format_reading(*p),
                })
                .collect();
            output::print_table(&rows);
            output::print_info(&format!(
                "Confidence: {} ({})",
                output::format_confidence(response.confidence),
                confidence_label(response.confidence)
            ));
        }
    }

    Ok(())
}

/// Request an anomaly scan and print it
pub async fn anomalies(
    client: &ApiClient,
    machine_id: &str,
    series: Vec<f64>,
    threshold: f64,
    format: OutputFormat,
) -> Result<()> {
    let request = AnomalyRequest {
        machine_id: machine_id.to_string(),
        data: series.clone(),
        threshold,
    };
    let response: AnomalyResponse = client.post("/anomalies", &request).await?;

    match format {
        OutputFormat::Json => {
            output::print_json(&response)?;
        }
        OutputFormat::Table => {
            let rows: Vec<AnomalyRow> = response
                .anomaly_scores
                .iter()
                .enumerate()
                .map(|(i, score)| AnomalyRow {
                    index: i,
                    reading: series
                        .get(i)
                        .map(|v| output::format_reading(*v))
                        .unwrap_or_default(),
                    score: format!("{:.2}", score),
                    flagged: if response.anomalies.contains(&i) {
                        "yes".to_string()
                    } else {
                        String::new()
                    },
                })
                .collect();
            output::print_table(&rows);

            if response.anomalies.is_empty() {
                output::print_success("No anomalies flagged");
            } else {
                output::print_warning(&format!(
                    "{} of {} readings flagged above threshold {}",
                    response.anomalies.len(),
                    series.len(),
                    threshold
                ));
            }
        }
    }

    Ok(())
}

/// Request series statistics and print them
pub async fn stats(client: &ApiClient, series: Vec<f64>, format: OutputFormat) -> Result<()> {
    let response: StatisticsResponse = client.post("/statistics", &series).await?;

    match format {
        OutputFormat::Json => {
            output::print_json(&response)?;
        }
        OutputFormat::Table => {
            let rows = vec![
                StatRow {
                    metric: "count".to_string(),
                    value: response.count.to_string(),
                },
                StatRow {
                    metric: "mean".to_string(),
                    value: output::format_reading(response.mean),
                },
                StatRow {
                    metric: "median".to_string(),
                    value: output::format_reading(response.median),
                },
                StatRow {
                    metric: "std".to_string(),
                    value: output::format_reading(response.std),
                },
                StatRow {
                    metric: "min".to_string(),
                    value: output::format_reading(response.min),
                },
                StatRow {
                    metric: "max".to_string(),
                    value: output::format_reading(response.max),
                },
                StatRow {
                    metric: "quartile_25".to_string(),
                    value: output::format_reading(response.quartile_25),
                },
                StatRow {
                    metric: "quartile_75".to_string(),
                    value: output::format_reading(response.quartile_75),
                },
            ];
            output::print_table(&rows);
        }
    }

    Ok(())
}

/// Human label for the fixed provenance levels
fn confidence_label(confidence: f64) -> &'static str {
    if confidence >= 0.9 {
        "model"
    } else if confidence >= 0.6 {
        "smoothing fallback"
    } else {
        "degraded fallback"
    }
}
