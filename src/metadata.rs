//! Typed wrapper around the combined station metadata table.
//!
//! Upstream data loading assembles one dataframe describing every known
//! station: identifier, display name, coordinates and the dataset it
//! belongs to. The wrapper checks that contract once, at the boundary,
//! so the figure builders can assume a well-formed table.

use polars::prelude::*;
use thiserror::Error;

/// Station identifier column.
pub const COL_STATION_ID: &str = "station_id";
/// Human-readable station name column.
pub const COL_STATION_NAME: &str = "station_name";
/// Latitude column, decimal degrees.
pub const COL_LATITUDE: &str = "latitude";
/// Longitude column, decimal degrees.
pub const COL_LONGITUDE: &str = "longitude";
/// Dataset/group label column.
pub const COL_TITLE: &str = "title";

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Required metadata column '{column}' is missing")]
    MissingColumn { column: String },

    #[error("Metadata column '{column}' has type {dtype}, expected {expected}")]
    InvalidColumnType {
        column: String,
        dtype: String,
        expected: String,
    },

    #[error("Duplicate station id '{station}' in metadata")]
    DuplicateStationId { station: String },

    #[error("Station id '{station}' not found in metadata")]
    StationNotFound { station: String },

    #[error("Null value in metadata column '{column}'")]
    NullValue { column: String },

    #[error("Failed processing metadata frame: {0}")]
    Frame(#[from] PolarsError),
}

/// The combined station metadata table.
///
/// Wraps a [`DataFrame`] with the columns [`COL_STATION_ID`],
/// [`COL_STATION_NAME`], [`COL_LATITUDE`], [`COL_LONGITUDE`] and
/// [`COL_TITLE`]. Construction validates column presence, dtypes and the
/// uniqueness of station ids; lookups afterwards can only fail on a
/// missing id.
///
/// # Examples
///
/// ```
/// use polars::prelude::*;
/// use rainviz::StationMetadata;
///
/// let df = df!(
///     "station_id" => ["S1", "S2"],
///     "station_name" => ["Alpha", "Beta"],
///     "latitude" => [-6.2, -6.9],
///     "longitude" => [106.8, 107.6],
///     "title" => ["Dataset A", "Dataset A"],
/// )
/// .unwrap();
///
/// let metadata = StationMetadata::new(df).unwrap();
/// assert_eq!(metadata.station_name("S2").unwrap(), "Beta");
/// ```
#[derive(Debug, Clone)]
pub struct StationMetadata {
    df: DataFrame,
}

fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

impl StationMetadata {
    /// Wraps and validates a metadata frame.
    ///
    /// # Errors
    ///
    /// [`MetadataError::MissingColumn`] when a required column is absent,
    /// [`MetadataError::InvalidColumnType`] on a dtype mismatch, and
    /// [`MetadataError::DuplicateStationId`] when two rows share an id.
    pub fn new(df: DataFrame) -> Result<Self, MetadataError> {
        for column in [COL_STATION_ID, COL_STATION_NAME, COL_TITLE] {
            let col = df
                .column(column)
                .map_err(|_| MetadataError::MissingColumn {
                    column: column.to_string(),
                })?;
            if col.dtype() != &DataType::String {
                return Err(MetadataError::InvalidColumnType {
                    column: column.to_string(),
                    dtype: col.dtype().to_string(),
                    expected: "str".to_string(),
                });
            }
        }
        for column in [COL_LATITUDE, COL_LONGITUDE] {
            let col = df
                .column(column)
                .map_err(|_| MetadataError::MissingColumn {
                    column: column.to_string(),
                })?;
            if !is_numeric_dtype(col.dtype()) {
                return Err(MetadataError::InvalidColumnType {
                    column: column.to_string(),
                    dtype: col.dtype().to_string(),
                    expected: "numeric".to_string(),
                });
            }
        }

        let metadata = StationMetadata { df };
        let ids = metadata.ids()?;
        let mut seen = std::collections::HashSet::with_capacity(ids.len());
        for id in &ids {
            if !seen.insert(id.as_str()) {
                return Err(MetadataError::DuplicateStationId {
                    station: id.clone(),
                });
            }
        }
        Ok(metadata)
    }

    /// Number of stations in the table.
    pub fn len(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// The wrapped frame.
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    fn string_column(&self, column: &str) -> Result<Vec<String>, MetadataError> {
        let ca = self.df.column(column)?.str()?;
        ca.into_iter()
            .map(|value| {
                value.map(str::to_string).ok_or(MetadataError::NullValue {
                    column: column.to_string(),
                })
            })
            .collect()
    }

    fn float_column(&self, column: &str) -> Result<Vec<f64>, MetadataError> {
        let ca = self.df.column(column)?.cast(&DataType::Float64)?;
        ca.f64()?
            .into_iter()
            .map(|value| {
                value.ok_or(MetadataError::NullValue {
                    column: column.to_string(),
                })
            })
            .collect()
    }

    /// Station ids, in row order.
    pub fn ids(&self) -> Result<Vec<String>, MetadataError> {
        self.string_column(COL_STATION_ID)
    }

    /// Station display names, in row order.
    pub fn names(&self) -> Result<Vec<String>, MetadataError> {
        self.string_column(COL_STATION_NAME)
    }

    /// Dataset/group labels, in row order.
    pub fn titles(&self) -> Result<Vec<String>, MetadataError> {
        self.string_column(COL_TITLE)
    }

    pub fn latitudes(&self) -> Result<Vec<f64>, MetadataError> {
        self.float_column(COL_LATITUDE)
    }

    pub fn longitudes(&self) -> Result<Vec<f64>, MetadataError> {
        self.float_column(COL_LONGITUDE)
    }

    /// Looks up the display name for one station id.
    ///
    /// # Errors
    ///
    /// [`MetadataError::StationNotFound`] when the id has no row.
    pub fn station_name(&self, station_id: &str) -> Result<String, MetadataError> {
        let ids = self.df.column(COL_STATION_ID)?.str()?;
        let names = self.df.column(COL_STATION_NAME)?.str()?;
        for (id, name) in ids.into_iter().zip(names) {
            if id == Some(station_id) {
                return name
                    .map(str::to_string)
                    .ok_or(MetadataError::NullValue {
                        column: COL_STATION_NAME.to_string(),
                    });
            }
        }
        Err(MetadataError::StationNotFound {
            station: station_id.to_string(),
        })
    }
}
