//! Error types for text metrics

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextMetricsError {
    #[error("Text measurement failed: {0}")]
    MeasureFailed(String),

    #[error("Text draw failed: {0}")]
    DrawFailed(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, TextMetricsError>;
