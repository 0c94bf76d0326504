//! Server configuration

use anyhow::Result;
use serde::Deserialize;

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the predictive model artifact
    #[serde(default = "default_model_path")]
    pub model_path: String,
}

fn default_port() -> u16 {
    8001
}

fn default_model_path() -> String {
    "model.onnx".to_string()
}

impl ServerConfig {
    /// Load configuration from EIS-prefixed environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("EIS"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ServerConfig {
            port: default_port(),
            model_path: default_model_path(),
        }))
    }
}
