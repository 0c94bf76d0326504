//! Predictive model holder
//!
//! The model is an opaque capability that may be absent or may fail at call
//! time. Loading happens once at process start; after that the handle is
//! read-only and shared across requests without locking.

mod onnx;

pub use onnx::{OnnxModel, INPUT_WINDOW};

use std::sync::Arc;
use thiserror::Error;

/// Errors from the predictive model call
#[derive(Debug, Error)]
pub enum ModelError {
    /// No model artifact was loaded at startup
    #[error("no model loaded")]
    Unavailable,

    /// Input series does not match the model's expected input shape
    #[error("model expects at least {expected} readings, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The artifact failed to produce a prediction
    #[error("inference failed: {0}")]
    Inference(String),
}

/// Contract for prediction implementations
pub trait Model: Send + Sync {
    /// Produce future values from a historical series
    fn predict(&self, series: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Immutable handle to the optionally-loaded model
///
/// Constructed once during startup and injected into the forecast engine.
/// Cloning shares the underlying model.
#[derive(Clone)]
pub struct ModelHandle {
    model: Option<Arc<dyn Model>>,
}

impl ModelHandle {
    /// Handle with no model; forecasts use the smoothing fallback
    pub fn absent() -> Self {
        Self { model: None }
    }

    /// Handle wrapping a loaded model
    pub fn new(model: Arc<dyn Model>) -> Self {
        Self { model: Some(model) }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_some()
    }

    pub fn predict(&self, series: &[f64]) -> Result<Vec<f64>, ModelError> {
        match &self.model {
            Some(model) => model.predict(series),
            None => Err(ModelError::Unavailable),
        }
    }
}
