//! Error types for the grid model

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("Cell ({row}, {col}) is outside a {rows}x{cols} band")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Merge region {0} overlaps an existing region")]
    OverlappingMerge(String),

    #[error("Invalid merge region: {0}")]
    InvalidRegion(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
