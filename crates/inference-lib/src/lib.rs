//! Core library for the energy inference service
//!
//! This crate provides:
//! - Forecasting with model-vs-fallback branching
//! - Z-score anomaly scoring
//! - Descriptive series statistics
//! - The read-only model holder contract
//! - Metrics and structured logging

pub mod engine;
pub mod error;
pub mod models;
pub mod observability;
pub mod predictor;

pub use error::EngineError;
pub use models::*;
pub use observability::{EngineMetrics, StructuredLogger};
pub use predictor::{Model, ModelError, ModelHandle, OnnxModel};
