//! Engine error taxonomy
//!
//! Validation failures are detected before any computation runs and carry
//! the exact minimum the caller violated. Anything else that goes wrong
//! inside an engine is an internal error and is reported without leaking
//! computation detail.

use thiserror::Error;

/// Errors surfaced by the forecast, anomaly, and statistics engines
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input series is shorter than the engine's minimum
    #[error("need at least {required} data points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Unexpected failure during computation
    #[error("computation failed: {0}")]
    Internal(String),
}

impl EngineError {
    /// True when the error is the caller's fault (malformed request)
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::InsufficientData { .. })
    }
}

/// Validate a series against an engine's minimum length
pub fn require_min_len(series: &[f64], required: usize) -> Result<(), EngineError> {
    if series.len() < required {
        return Err(EngineError::InsufficientData {
            required,
            actual: series.len(),
        });
    }
    Ok(())
}
