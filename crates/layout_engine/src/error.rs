//! Error types for the layout engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Merged region {region} is {height} units tall but the page body is only {page}")]
    RegionTallerThanPage {
        region: String,
        height: f32,
        page: f32,
    },

    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    #[error("Text metrics error: {0}")]
    Metrics(#[from] text_metrics::TextMetricsError),

    #[error("Grid model error: {0}")]
    Grid(#[from] grid_model::GridError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
