use crate::coordinate::CoordinateError;
use crate::metadata::MetadataError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FigureError {
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Required column '{column}' not found in frame")]
    MissingColumn { column: String },

    #[error("Null period in column '{column}' at row {row}")]
    NullDate { column: String, row: usize },

    #[error("Null value in column '{column}' at row {row}")]
    NullValue { column: String, row: usize },

    #[error("Failed processing DataFrame: {0}")]
    Frame(#[from] PolarsError),
}
