//! Data-completeness figures: the stations × time heatmap and the
//! single-station stacked bar.

use crate::builder::FigureBuilder;
use crate::error::RainvizError;
use crate::frames::{date_column, numeric_column, station_columns, COL_DATE};
use crate::metadata::StationMetadata;
use crate::types::figure::Figure;
use crate::types::layout::{
    Anchor, AxisOptions, BarMode, DragMode, HoverMode, Layout, LegendOptions, Margin, Orientation,
    Title,
};
use crate::types::trace::{BarSeries, HeatGrid, Marker, MarkerLine, Trace, Visible};
use bon::bon;
use log::debug;
use polars::prelude::DataFrame;

/// Minimum heatmap height; below this the figure looks cramped even for a
/// handful of stations.
const MIN_HEATMAP_HEIGHT: u32 = 450;
/// Vertical pixels granted to each station row.
const HEATMAP_ROW_HEIGHT: u32 = 45;

const BORDER_COLOR: &str = "DarkGray";
/// Legend rank pushing the border series below every real series.
const BORDER_LEGEND_RANK: u32 = 500;

#[bon]
impl FigureBuilder {
    /// Builds the completeness heatmap over every station.
    ///
    /// The grid runs chronologically along the horizontal axis and lists
    /// stations along the vertical axis in reverse of their column order in
    /// the table, so the first station ends up in the top row. Cells hold
    /// percentage values (0–100); the color scale is pinned to that range
    /// regardless of the data. Each cell also carries a human-readable
    /// period label ("January 2024") for hover display. The figure grows
    /// with the station count so rows never compress below a readable
    /// height, and vertical zooming is disabled.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.table(&DataFrame)`: **Required.** Measurement table with a
    ///   `date` column and one percentage column per station.
    /// * `.metadata(&StationMetadata)`: Optional. When given, row labels
    ///   become `"<station_id> - <station_name>"`; a station column with
    ///   no metadata row is a lookup failure.
    ///
    /// # Errors
    ///
    /// Returns [`RainvizError::Figure`] variants when the `date` column is
    /// missing or malformed, and [`RainvizError::Metadata`] lookup failures
    /// for unknown station ids.
    #[builder]
    pub fn figure_comp_heatmap(
        &self,
        table: &DataFrame,
        metadata: Option<&StationMetadata>,
    ) -> Result<Figure, RainvizError> {
        let dates = date_column(table, COL_DATE)?;
        let stations = station_columns(table);

        let x: Vec<String> = dates
            .iter()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .collect();
        let period_labels: Vec<String> = dates
            .iter()
            .map(|date| date.format("%B %Y").to_string())
            .collect();

        let mut z = Vec::with_capacity(stations.len());
        let mut y = Vec::with_capacity(stations.len());
        let mut tick_text = Vec::with_capacity(stations.len());
        for station in stations.iter().rev() {
            z.push(numeric_column(table, station)?);
            let label = match metadata {
                Some(metadata) => format!("{} - {}", station, metadata.station_name(station)?),
                None => station.clone(),
            };
            y.push(label);
            tick_text.push(station.clone());
        }
        let custom_data = vec![period_labels; z.len()];
        debug!(
            "built completeness heatmap: {} stations over {} periods",
            stations.len(),
            dates.len()
        );

        let height = MIN_HEATMAP_HEIGHT.max(HEATMAP_ROW_HEIGHT * stations.len() as u32);
        let layout = Layout {
            x_axis: Some(AxisOptions {
                title: Some(Title::from("<b>Date</b>")),
                show_spikes: Some(true),
                ..Default::default()
            }),
            y_axis: Some(AxisOptions {
                title: Some(Title::from("<b>Station ID</b>")),
                fixed_range: Some(true),
                tick_values: Some(y.clone()),
                tick_text: Some(tick_text),
                ..Default::default()
            }),
            margin: Some(Margin::top_only(45)),
            drag_mode: Some(DragMode::Zoom),
            height: Some(height),
            show_legend: Some(true),
            ..Default::default()
        };

        let grid = Trace::HeatGrid(HeatGrid {
            z,
            x,
            y,
            z_min: 0.0,
            z_max: 100.0,
            custom_data,
            hover_template: Some("%{y}<br>%{customdata}<br><b>%{z}%</b><extra></extra>".to_string()),
        });

        Ok(Figure::new(vec![grid], layout))
    }

    /// Builds the stacked completeness bar for one station.
    ///
    /// The primary series holds the station's percentage per period; a
    /// secondary "border" series holds the complement to 100, so the stack
    /// always tops out at 100 where a value is present. The border is
    /// informational only: hidden until enabled through the legend, ranked
    /// below real series, and skipped by hover.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.table(&DataFrame)`: **Required.** Measurement table with a
    ///   `date` column and one percentage column per station.
    /// * `.station_id(&str)`: **Required.** The station column to plot; a
    ///   column absent from the table is a lookup failure.
    /// * `.metadata(&StationMetadata)`: **Required.** Supplies the display
    ///   name; an unknown id is a lookup failure.
    ///
    /// # Errors
    ///
    /// Returns [`RainvizError::Figure`] variants for a missing station or
    /// `date` column and [`RainvizError::Metadata`] for an unknown id.
    #[builder]
    pub fn figure_comp_bar_single(
        &self,
        table: &DataFrame,
        station_id: &str,
        metadata: &StationMetadata,
    ) -> Result<Figure, RainvizError> {
        let dates = date_column(table, COL_DATE)?;
        let values = numeric_column(table, station_id)?;
        let station_name = metadata.station_name(station_id)?;

        let x: Vec<String> = dates
            .iter()
            .map(|date| date.format("%b %Y").to_string())
            .collect();
        let border: Vec<Option<f64>> = values
            .iter()
            .map(|value| value.map(|value| 100.0 - value))
            .collect();
        debug!(
            "built completeness bar for {station_id} over {} periods",
            dates.len()
        );

        let primary = Trace::Bar(BarSeries {
            x: x.clone(),
            y: values,
            name: station_name.clone(),
            marker: Marker {
                line: Some(MarkerLine { width: 0 }),
                ..Default::default()
            },
            hover_template: Some(format!(
                "{station_id} - {station_name}<br>%{{x}}<br><b>%{{y}}%</b><extra></extra>"
            )),
            ..Default::default()
        });

        let border = Trace::Bar(BarSeries {
            x,
            y: border,
            name: "<i>(border)</i>".to_string(),
            marker: Marker {
                color: Some(BORDER_COLOR.to_string()),
                line: Some(MarkerLine { width: 0 }),
                ..Default::default()
            },
            hover_info: Some("skip".to_string()),
            legend_rank: Some(BORDER_LEGEND_RANK),
            visible: Some(Visible::LegendOnly),
            ..Default::default()
        });

        let layout = Layout {
            bar_mode: Some(BarMode::Stack),
            bar_gap: Some(0.0),
            hover_mode: Some(HoverMode::X),
            drag_mode: Some(DragMode::Zoom),
            show_legend: Some(true),
            legend: Some(LegendOptions {
                orientation: Some(Orientation::Horizontal),
                x_anchor: Some(Anchor::Left),
                y_anchor: Some(Anchor::Bottom),
                x: Some(0.01),
                y: Some(1.02),
                ..Default::default()
            }),
            x_axis: Some(AxisOptions {
                title: Some(Title::from("<b>Date</b>")),
                ..Default::default()
            }),
            y_axis: Some(AxisOptions {
                title: Some(Title::from("<b>Percentage (%)</b>")),
                fixed_range: Some(true),
                range: Some([0.0, 100.0]),
                ..Default::default()
            }),
            margin: Some(Margin::top_only(45)),
            ..Default::default()
        };

        Ok(Figure::new(vec![primary, border], layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateConfig;
    use crate::metadata::{COL_LATITUDE, COL_LONGITUDE, COL_STATION_ID, COL_STATION_NAME};
    use chrono::NaiveDate;
    use polars::prelude::*;

    fn builder() -> FigureBuilder {
        FigureBuilder::new(TemplateConfig::new("/assets/watermark.png"))
    }

    fn dates() -> [NaiveDate; 2] {
        [
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        ]
    }

    fn completeness_table() -> DataFrame {
        df!(
            COL_DATE => dates(),
            "S1" => [Some(90.0), Some(100.0)],
            "S2" => [Some(75.0), None],
            "S3" => [Some(50.0), Some(60.0)],
        )
        .unwrap()
    }

    fn metadata() -> StationMetadata {
        let df = df!(
            COL_STATION_ID => ["S1", "S2", "S3"],
            COL_STATION_NAME => ["Alpha", "Beta", "Gamma"],
            COL_LATITUDE => [-6.2, -6.9, -7.3],
            COL_LONGITUDE => [106.8, 107.6, 108.2],
            "title" => ["A", "A", "B"],
        )
        .unwrap();
        StationMetadata::new(df).unwrap()
    }

    fn wide_table(stations: usize) -> DataFrame {
        let mut columns = vec![Column::new(COL_DATE.into(), dates().as_slice())];
        for i in 0..stations {
            columns.push(Column::new(
                format!("S{i}").into(),
                vec![100.0f64, 100.0f64],
            ));
        }
        DataFrame::new(columns).unwrap()
    }

    #[test]
    fn heatmap_reverses_station_rows() {
        let figure = builder()
            .figure_comp_heatmap()
            .table(&completeness_table())
            .call()
            .unwrap();

        let Trace::HeatGrid(grid) = &figure.data[0] else {
            panic!("expected a heat grid");
        };
        assert_eq!(grid.y, ["S3", "S2", "S1"]);
        assert_eq!(grid.x, ["2024-01-01", "2024-02-01"]);
        assert_eq!(grid.z[0], [Some(50.0), Some(60.0)]);
        assert_eq!(grid.z[2], [Some(90.0), Some(100.0)]);
        assert_eq!((grid.z_min, grid.z_max), (0.0, 100.0));
        assert_eq!(grid.custom_data[0], ["January 2024", "February 2024"]);
    }

    #[test]
    fn heatmap_labels_rows_from_metadata() {
        let metadata = metadata();
        let figure = builder()
            .figure_comp_heatmap()
            .table(&completeness_table())
            .metadata(&metadata)
            .call()
            .unwrap();

        let Trace::HeatGrid(grid) = &figure.data[0] else {
            panic!("expected a heat grid");
        };
        assert_eq!(grid.y, ["S3 - Gamma", "S2 - Beta", "S1 - Alpha"]);
        let y_axis = figure.layout.y_axis.unwrap();
        assert_eq!(y_axis.tick_values.unwrap(), grid.y);
        assert_eq!(y_axis.tick_text.unwrap(), ["S3", "S2", "S1"]);
        assert_eq!(y_axis.fixed_range, Some(true));
    }

    #[test]
    fn heatmap_height_grows_with_station_count() {
        let three = builder()
            .figure_comp_heatmap()
            .table(&wide_table(3))
            .call()
            .unwrap();
        assert_eq!(three.layout.height, Some(450));

        let twenty = builder()
            .figure_comp_heatmap()
            .table(&wide_table(20))
            .call()
            .unwrap();
        assert_eq!(twenty.layout.height, Some(900));
    }

    #[test]
    fn heatmap_unknown_station_in_metadata_fails_lookup() {
        let table = df!(
            COL_DATE => dates(),
            "S9" => [Some(10.0), Some(20.0)],
        )
        .unwrap();
        let metadata = metadata();
        let err = builder()
            .figure_comp_heatmap()
            .table(&table)
            .metadata(&metadata)
            .call()
            .unwrap_err();
        assert!(matches!(err, RainvizError::Metadata(_)));
    }

    #[test]
    fn bar_border_is_the_complement_to_one_hundred() {
        let figure = builder()
            .figure_comp_bar_single()
            .table(&completeness_table())
            .station_id("S1")
            .metadata(&metadata())
            .call()
            .unwrap();

        let Trace::Bar(primary) = &figure.data[0] else {
            panic!("expected a bar trace");
        };
        let Trace::Bar(border) = &figure.data[1] else {
            panic!("expected a bar trace");
        };
        assert_eq!(primary.y, [Some(90.0), Some(100.0)]);
        assert_eq!(border.y, [Some(10.0), Some(0.0)]);
        for (value, complement) in primary.y.iter().zip(&border.y) {
            assert_eq!(value.unwrap() + complement.unwrap(), 100.0);
        }
        assert_eq!(primary.x, ["Jan 2024", "Feb 2024"]);
    }

    #[test]
    fn bar_border_series_is_informational_only() {
        let figure = builder()
            .figure_comp_bar_single()
            .table(&completeness_table())
            .station_id("S1")
            .metadata(&metadata())
            .call()
            .unwrap();

        let Trace::Bar(border) = &figure.data[1] else {
            panic!("expected a bar trace");
        };
        assert_eq!(border.name, "<i>(border)</i>");
        assert_eq!(border.visible, Some(Visible::LegendOnly));
        assert_eq!(border.hover_info.as_deref(), Some("skip"));
        assert_eq!(border.legend_rank, Some(500));
        assert_eq!(border.marker.color.as_deref(), Some("DarkGray"));
    }

    #[test]
    fn bar_layout_stacks_with_fixed_percentage_axis() {
        let figure = builder()
            .figure_comp_bar_single()
            .table(&completeness_table())
            .station_id("S2")
            .metadata(&metadata())
            .call()
            .unwrap();

        assert_eq!(figure.layout.bar_mode, Some(BarMode::Stack));
        assert_eq!(figure.layout.bar_gap, Some(0.0));
        let y_axis = figure.layout.y_axis.unwrap();
        assert_eq!(y_axis.range, Some([0.0, 100.0]));
        assert_eq!(y_axis.fixed_range, Some(true));

        // Null periods stay null in both series.
        let Trace::Bar(primary) = &figure.data[0] else {
            panic!("expected a bar trace");
        };
        let Trace::Bar(border) = &figure.data[1] else {
            panic!("expected a bar trace");
        };
        assert_eq!(primary.y[1], None);
        assert_eq!(border.y[1], None);
    }

    #[test]
    fn bar_unknown_station_fails_lookup() {
        let err = builder()
            .figure_comp_bar_single()
            .table(&completeness_table())
            .station_id("S9")
            .metadata(&metadata())
            .call()
            .unwrap_err();
        assert!(matches!(
            err,
            RainvizError::Figure(crate::figures::error::FigureError::MissingColumn { .. })
        ));
    }

    #[test]
    fn bar_station_present_but_missing_metadata_fails_lookup() {
        let table = df!(
            COL_DATE => dates(),
            "S9" => [Some(10.0), Some(20.0)],
        )
        .unwrap();
        let err = builder()
            .figure_comp_bar_single()
            .table(&table)
            .station_id("S9")
            .metadata(&metadata())
            .call()
            .unwrap_err();
        assert!(matches!(err, RainvizError::Metadata(_)));
    }
}
