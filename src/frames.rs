//! Column extraction helpers for time-indexed measurement tables.
//!
//! Measurement tables carry one [`COL_DATE`] column plus one numeric
//! column per station, in station order. These helpers pull columns out
//! into plain vectors for figure construction, failing with a typed error
//! instead of deferring to late frame panics.

use crate::figures::error::FigureError;
use chrono::NaiveDate;
use polars::prelude::*;

/// The period column of a measurement table.
pub const COL_DATE: &str = "date";
/// The computed distance column of a distance-augmented table.
pub const COL_DISTANCE: &str = "distance";

/// Extracts the period column as dates.
pub(crate) fn date_column(df: &DataFrame, column: &str) -> Result<Vec<NaiveDate>, FigureError> {
    let col = df.column(column).map_err(|_| FigureError::MissingColumn {
        column: column.to_string(),
    })?;
    let dates = col.as_materialized_series().date()?;
    dates
        .as_date_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or(FigureError::NullDate {
                column: column.to_string(),
                row,
            })
        })
        .collect()
}

/// Extracts a numeric column, keeping nulls as `None`.
pub(crate) fn numeric_column(
    df: &DataFrame,
    column: &str,
) -> Result<Vec<Option<f64>>, FigureError> {
    let col = df.column(column).map_err(|_| FigureError::MissingColumn {
        column: column.to_string(),
    })?;
    Ok(col.cast(&DataType::Float64)?.f64()?.to_vec())
}

/// Extracts a numeric column that must not contain nulls.
pub(crate) fn float_column(df: &DataFrame, column: &str) -> Result<Vec<f64>, FigureError> {
    numeric_column(df, column)?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or(FigureError::NullValue {
                column: column.to_string(),
                row,
            })
        })
        .collect()
}

/// Extracts a string column that must not contain nulls.
pub(crate) fn string_column(df: &DataFrame, column: &str) -> Result<Vec<String>, FigureError> {
    let col = df.column(column).map_err(|_| FigureError::MissingColumn {
        column: column.to_string(),
    })?;
    col.str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.map(str::to_string).ok_or(FigureError::NullValue {
                column: column.to_string(),
                row,
            })
        })
        .collect()
}

/// All station columns of a measurement table, in table order.
pub(crate) fn station_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .filter(|name| name != COL_DATE)
        .collect()
}
