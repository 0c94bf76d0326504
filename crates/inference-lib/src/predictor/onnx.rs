//! ONNX model inference using tract
//!
//! Loads the predictive artifact via tract-onnx with a fixed input window
//! and runs synchronous in-process inference.

use super::{Model, ModelError};
use anyhow::{Context, Result};
use std::time::Instant;
use tract_onnx::prelude::*;
use tracing::{debug, warn};

/// Number of trailing readings consumed per inference
pub const INPUT_WINDOW: usize = 24;

/// Maximum inference latency before warning (5ms target)
const MAX_INFERENCE_MS: u128 = 5;

type TractModel = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// ONNX-backed model loaded once at startup
pub struct OnnxModel {
    plan: TractModel,
    version: String,
}

impl OnnxModel {
    /// Load and optimize an ONNX model from bytes
    pub fn from_bytes(model_bytes: &[u8], version: impl Into<String>) -> Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_read(&mut std::io::Cursor::new(model_bytes))
            .context("Failed to parse ONNX model")?
            .with_input_fact(0, f32::fact([1, INPUT_WINDOW]).into())
            .context("Failed to set input shape")?
            .into_optimized()
            .context("Failed to optimize model")?
            .into_runnable()
            .context("Failed to create runnable model")?;
        Ok(Self {
            plan,
            version: version.into(),
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Convert the trailing window of a series to tensor input
    fn series_to_tensor(series: &[f64]) -> Result<Tensor, ModelError> {
        if series.len() < INPUT_WINDOW {
            return Err(ModelError::ShapeMismatch {
                expected: INPUT_WINDOW,
                actual: series.len(),
            });
        }
        let window: Vec<f32> = series[series.len() - INPUT_WINDOW..]
            .iter()
            .map(|v| *v as f32)
            .collect();
        tract_ndarray::Array2::from_shape_vec((1, INPUT_WINDOW), window)
            .map(Into::into)
            .map_err(|e| ModelError::Inference(e.to_string()))
    }
}

impl Model for OnnxModel {
    fn predict(&self, series: &[f64]) -> Result<Vec<f64>, ModelError> {
        let start = Instant::now();
        let input = Self::series_to_tensor(series)?;

        let result = self
            .plan
            .run(tvec!(input.into()))
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let output = result
            .first()
            .ok_or_else(|| ModelError::Inference("no output from model".to_string()))?;
        let view = output
            .to_array_view::<f32>()
            .map_err(|e| ModelError::Inference(e.to_string()))?;
        let values: Vec<f64> = view.iter().map(|v| *v as f64).collect();

        let elapsed = start.elapsed();
        if elapsed.as_millis() > MAX_INFERENCE_MS {
            warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                "Inference exceeded {}ms target", MAX_INFERENCE_MS
            );
        } else {
            debug!(elapsed_us = elapsed.as_micros() as u64, "Inference completed");
        }

        Ok(values)
    }
}
