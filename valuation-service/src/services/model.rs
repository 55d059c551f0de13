//! Model abstraction used by the valuation endpoint.
//!
//! Handlers only see `dyn PriceModel`, so the regression backend can be swapped
//! (or stubbed in tests) without touching request handling.

use crate::models::ValuationRequest;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artefact not found at {0}")]
    NotFound(PathBuf),

    #[error("model artefact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artefact is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("model training failed: {0}")]
    Training(String),

    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

/// A regression estimator mapping six housing features to a price.
pub trait PriceModel: Send + Sync {
    /// Synchronous inference; callers run it off the async executor.
    fn predict(&self, input: &ValuationRequest) -> Result<f64, ModelError>;

    fn name(&self) -> &str;

    fn version(&self) -> &str;
}
