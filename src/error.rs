use crate::coordinate::CoordinateError;
use crate::figures::error::FigureError;
use crate::metadata::MetadataError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RainvizError {
    #[error(transparent)]
    Figure(#[from] FigureError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}
