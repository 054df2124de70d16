//! The multi-station rainfall line chart.

use crate::builder::FigureBuilder;
use crate::error::RainvizError;
use crate::frames::{date_column, numeric_column, station_columns, COL_DATE};
use crate::metadata::StationMetadata;
use crate::types::figure::Figure;
use crate::types::layout::{AxisOptions, HoverMode, Layout, LegendOptions, Margin, Title};
use crate::types::trace::{LineSeries, Mode, Trace};
use bon::bon;
use log::debug;
use polars::prelude::DataFrame;

#[bon]
impl FigureBuilder {
    /// Builds the rainfall line chart, one line per station column.
    ///
    /// Values are plotted exactly as they appear in the table: nulls stay
    /// null and render as gaps, with no aggregation, smoothing or
    /// gap-filling. Lines are named `"<station_id> - <station_name>"` via
    /// the metadata table.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.table(&DataFrame)`: **Required.** Measurement table with a
    ///   `date` column and one rainfall column per station.
    /// * `.metadata(&StationMetadata)`: **Required.** Supplies display
    ///   names; a column id absent from the metadata is a lookup failure.
    ///
    /// # Errors
    ///
    /// Returns [`RainvizError::Figure`] variants when the `date` column is
    /// missing or malformed, and [`RainvizError::Metadata`] lookup
    /// failures for unknown station ids.
    #[builder]
    pub fn figure_scatter(
        &self,
        table: &DataFrame,
        metadata: &StationMetadata,
    ) -> Result<Figure, RainvizError> {
        let dates = date_column(table, COL_DATE)?;
        let x: Vec<String> = dates
            .iter()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .collect();

        let stations = station_columns(table);
        let mut data = Vec::with_capacity(stations.len());
        for station in &stations {
            let name = format!("{} - {}", station, metadata.station_name(station)?);
            data.push(Trace::Line(LineSeries {
                x: x.clone(),
                y: numeric_column(table, station)?,
                mode: Some(Mode::Lines),
                name,
            }));
        }
        debug!(
            "built rainfall line chart: {} stations over {} periods",
            stations.len(),
            dates.len()
        );

        let layout = Layout {
            hover_mode: Some(HoverMode::Closest),
            x_axis: Some(AxisOptions {
                title: Some(Title::from("<b>Date</b>")),
                ..Default::default()
            }),
            y_axis: Some(AxisOptions {
                title: Some(Title::from("<b>Rainfall (mm)</b>")),
                ..Default::default()
            }),
            legend: Some(LegendOptions {
                title: Some(Title::from("<b>Stations</b>")),
                ..Default::default()
            }),
            margin: Some(Margin::top_only(25)),
            ..Default::default()
        };

        Ok(Figure::new(data, layout))
    }
}
