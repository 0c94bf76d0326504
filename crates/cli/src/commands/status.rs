//! Service status commands

use crate::client::{ApiClient, HealthResponse, ModelInfoResponse};
use crate::output::{self, OutputFormat};
use anyhow::Result;
use tabled::Tabled;

#[derive(Tabled)]
struct InfoRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Check service health
pub async fn health(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let health: HealthResponse = client.get("/health").await?;

    match format {
        OutputFormat::Json => {
            output::print_json(&health)?;
        }
        OutputFormat::Table => {
            if health.model_loaded {
                output::print_success(&format!("{} (model loaded)", health.status));
            } else {
                output::print_warning(&format!("{} (fallback-only, no model loaded)", health.status));
            }
        }
    }

    Ok(())
}

/// Show information about the loaded model
pub async fn model_info(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let info: ModelInfoResponse = client.get("/model-info").await?;

    match format {
        OutputFormat::Json => {
            output::print_json(&info)?;
        }
        OutputFormat::Table => {
            let rows = vec![
                InfoRow {
                    field: "model_loaded".to_string(),
                    value: info.model_loaded.to_string(),
                },
                InfoRow {
                    field: "model_path".to_string(),
                    value: info.model_path,
                },
                InfoRow {
                    field: "version".to_string(),
                    value: info.version,
                },
                InfoRow {
                    field: "capabilities".to_string(),
                    value: info.capabilities.join(", "),
                },
            ];
            output::print_table(&rows);
        }
    }

    Ok(())
}
