//! Geographic map figures: the all-stations overview and the
//! coordinate-proximity view.

use crate::builder::FigureBuilder;
use crate::coordinate::LatLon;
use crate::error::RainvizError;
use crate::frames::{float_column, string_column, COL_DISTANCE};
use crate::metadata::{
    StationMetadata, COL_LATITUDE, COL_LONGITUDE, COL_STATION_ID, COL_STATION_NAME,
};
use crate::types::figure::Figure;
use crate::types::layout::{
    Anchor, ClickMode, DragMode, ImageOverlay, ItemSizing, Layer, Layout, LegendOptions, MapCenter,
    MapOptions, Margin, Orientation, Title,
};
use crate::types::trace::{Marker, Mode, Opacity, ScatterMap, Trace};
use bon::bon;
use log::{debug, warn};
use ordered_float::OrderedFloat;
use polars::prelude::DataFrame;
use serde_json::{json, Value};

/// Centroid of the monitored coverage area; keeps the overview map framed
/// on the full station network.
const SERVICE_AREA_CENTER: MapCenter = MapCenter {
    lat: -2.600029,
    lon: 118.015776,
};

/// Zoom level framing a reference point together with its nearest stations.
const PROXIMITY_ZOOM: f64 = 9.5;

const STATION_MARKER_SIZE: u32 = 12;
const POINT_MARKER_SIZE: u32 = 15;
const STATION_COLOR: &str = "MidnightBlue";
const POINT_COLOR: &str = "red";
const TRANSPARENT: &str = "rgba(0,0,0,0)";

const LOWEST_OPACITY: f64 = 0.4;
const HIGHEST_OPACITY: f64 = 1.0;

/// Rescales station distances into the marker opacity range
/// [`LOWEST_OPACITY`, `HIGHEST_OPACITY`] by linear min-max scaling,
/// aligned to rows by index. Single-row input pins to full opacity, and
/// the same guard covers empty input and all-equal distances (degenerate
/// min = max), so the scaling never divides by zero.
fn scale_opacity(distances: &[f64]) -> Vec<f64> {
    if distances.len() <= 1 {
        return vec![HIGHEST_OPACITY; distances.len()];
    }
    let extrema = distances.iter().copied().map(OrderedFloat);
    let (Some(OrderedFloat(min)), Some(OrderedFloat(max))) =
        (extrema.clone().min(), extrema.max())
    else {
        return Vec::new();
    };
    let span = max - min;
    if span == 0.0 {
        warn!(
            "all {} station distances are equal; pinning markers to full opacity",
            distances.len()
        );
        return vec![HIGHEST_OPACITY; distances.len()];
    }
    distances
        .iter()
        .map(|d| LOWEST_OPACITY + (HIGHEST_OPACITY - LOWEST_OPACITY) * ((d - min) / span))
        .collect()
}

#[bon]
impl FigureBuilder {
    /// Builds the overview map of every known station.
    ///
    /// Rows are partitioned by dataset label in first-appearance order and
    /// each dataset becomes one point layer, so the legend doubles as a
    /// dataset toggle. Points carry their station id as payload for
    /// click-to-select handling. An empty metadata table yields a map with
    /// no layers.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.metadata(&StationMetadata)`: **Required.** The combined station
    ///   metadata table.
    ///
    /// # Errors
    ///
    /// Returns [`RainvizError::Metadata`] variants when column extraction
    /// fails on the wrapped frame.
    #[builder]
    pub fn figure_map_all_stations(
        &self,
        metadata: &StationMetadata,
    ) -> Result<Figure, RainvizError> {
        let ids = metadata.ids()?;
        let names = metadata.names()?;
        let lats = metadata.latitudes()?;
        let lons = metadata.longitudes()?;
        let titles = metadata.titles()?;

        let mut datasets: Vec<&str> = Vec::new();
        for title in &titles {
            if !datasets.contains(&title.as_str()) {
                datasets.push(title);
            }
        }

        let mut data = Vec::with_capacity(datasets.len());
        for dataset in &datasets {
            let rows: Vec<usize> = titles
                .iter()
                .enumerate()
                .filter(|(_, title)| title.as_str() == *dataset)
                .map(|(row, _)| row)
                .collect();
            data.push(Trace::ScatterMap(ScatterMap {
                lat: rows.iter().map(|&row| lats[row]).collect(),
                lon: rows.iter().map(|&row| lons[row]).collect(),
                text: rows.iter().map(|&row| names[row].clone()).collect(),
                custom_data: rows
                    .iter()
                    .map(|&row| Value::String(ids[row].clone()))
                    .collect(),
                name: (*dataset).to_string(),
                marker: Marker {
                    size: Some(STATION_MARKER_SIZE),
                    opacity: Some(Opacity::Uniform(0.8)),
                    ..Default::default()
                },
                ..Default::default()
            }));
        }
        debug!(
            "built all-stations map: {} datasets, {} stations",
            data.len(),
            titles.len()
        );

        let layout = Layout {
            click_mode: Some(ClickMode::Event),
            margin: Some(Margin::uniform(0)),
            map: Some(MapOptions {
                center: SERVICE_AREA_CENTER,
                zoom: None,
            }),
            drag_mode: Some(DragMode::Disabled),
            show_legend: Some(true),
            legend: Some(LegendOptions {
                title: Some(Title::from("<b>Dataset</b>")),
                x_anchor: Some(Anchor::Left),
                y_anchor: Some(Anchor::Top),
                x: Some(0.01),
                y: Some(0.99),
                background_color: Some(TRANSPARENT.to_string()),
                ..Default::default()
            }),
            images: vec![ImageOverlay {
                source: self.template().watermark_source().to_string(),
                x_ref: "x domain".to_string(),
                y_ref: "y domain".to_string(),
                x: 0.01,
                y: 0.02,
                size_x: 0.2,
                size_y: 0.2,
                x_anchor: Anchor::Left,
                y_anchor: Anchor::Bottom,
                name: "watermark".to_string(),
                layer: Layer::Above,
                opacity: 0.7,
            }],
            ..Default::default()
        };

        Ok(Figure::new(data, layout))
    }

    /// Builds the map of a reference coordinate and its nearby stations.
    ///
    /// The station table is the distance-augmented frame produced by
    /// [`StationMetadata::with_distances`] (or an upstream equivalent,
    /// sorted nearest first). Marker opacity encodes relative distance:
    /// distances are min-max scaled into [0.4, 1.0] and assigned row by
    /// row, so a two-row table with distances `[10 km, 20 km]` yields
    /// opacities `[0.4, 1.0]`. The reference point renders as a single
    /// fully opaque red marker.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.point_coordinate(&str)`: **Required.** Free-form coordinate
    ///   string, parsed via [`LatLon`]'s `FromStr`.
    /// * `.name_coordinate(&str)`: **Required.** Display name for the
    ///   reference point.
    /// * `.stations(&DataFrame)`: **Required.** Distance-augmented station
    ///   table; may be empty.
    ///
    /// # Errors
    ///
    /// Returns [`RainvizError::Coordinate`] when the coordinate string
    /// does not parse, and [`RainvizError::Figure`] variants when a
    /// required column is missing from the station table.
    #[builder]
    pub fn figure_map_coordinate(
        &self,
        point_coordinate: &str,
        name_coordinate: &str,
        stations: &DataFrame,
    ) -> Result<Figure, RainvizError> {
        let point: LatLon = point_coordinate.parse()?;

        let ids = string_column(stations, COL_STATION_ID)?;
        let names = string_column(stations, COL_STATION_NAME)?;
        let lats = float_column(stations, COL_LATITUDE)?;
        let lons = float_column(stations, COL_LONGITUDE)?;
        let distances = float_column(stations, COL_DISTANCE)?;
        let opacities = scale_opacity(&distances);
        debug!(
            "built proximity map for '{}' at {}: {} stations",
            name_coordinate,
            point,
            ids.len()
        );

        let custom_data: Vec<Value> = ids
            .iter()
            .zip(&distances)
            .map(|(id, distance)| json!([id, distance]))
            .collect();

        let stations_trace = Trace::ScatterMap(ScatterMap {
            lat: lats,
            lon: lons,
            text: names,
            custom_data,
            name: "Nearest Stations".to_string(),
            mode: Some(Mode::MarkersText),
            marker: Marker {
                size: Some(STATION_MARKER_SIZE),
                color: Some(STATION_COLOR.to_string()),
                opacity: Some(Opacity::PerPoint(opacities)),
                ..Default::default()
            },
            text_position: Some("bottom right".to_string()),
            text_template: Some("%{customdata[0]}<br>%{text}<br>%{customdata[1]:.3f} km".to_string()),
            hover_template: Some(
                "%{customdata[0]} - %{text}<br>(%{lat:.5f}, %{lon:.5f})<br><b>%{customdata[1]:.3f} km</b><extra></extra>"
                    .to_string(),
            ),
        });

        let point_trace = Trace::ScatterMap(ScatterMap {
            lat: vec![point.0],
            lon: vec![point.1],
            text: vec![name_coordinate.to_string()],
            name: name_coordinate.to_string(),
            mode: Some(Mode::MarkersText),
            marker: Marker {
                size: Some(POINT_MARKER_SIZE),
                color: Some(POINT_COLOR.to_string()),
                opacity: Some(Opacity::Uniform(1.0)),
                ..Default::default()
            },
            text_position: Some("bottom center".to_string()),
            hover_template: Some("%{text}<br>(%{lat:.5f}, %{lon:.5f})<extra></extra>".to_string()),
            ..Default::default()
        });

        let layout = Layout {
            click_mode: Some(ClickMode::Event),
            margin: Some(Margin::uniform(0)),
            map: Some(MapOptions {
                center: MapCenter {
                    lat: point.0,
                    lon: point.1,
                },
                zoom: Some(PROXIMITY_ZOOM),
            }),
            drag_mode: Some(DragMode::Disabled),
            show_legend: Some(true),
            legend: Some(LegendOptions {
                orientation: Some(Orientation::Horizontal),
                x_anchor: Some(Anchor::Left),
                y_anchor: Some(Anchor::Bottom),
                x: Some(0.01),
                y: Some(1.02),
                background_color: Some(TRANSPARENT.to_string()),
                item_sizing: Some(ItemSizing::Constant),
                ..Default::default()
            }),
            images: vec![ImageOverlay {
                source: self.template().watermark_source().to_string(),
                x_ref: "x domain".to_string(),
                y_ref: "y domain".to_string(),
                x: 0.5,
                y: 0.02,
                size_x: 0.3,
                size_y: 0.3,
                x_anchor: Anchor::Center,
                y_anchor: Anchor::Bottom,
                name: "watermark".to_string(),
                layer: Layer::Above,
                opacity: 0.6,
            }],
            ..Default::default()
        };

        Ok(Figure::new(vec![stations_trace, point_trace], layout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateConfig;
    use polars::prelude::*;

    fn builder() -> FigureBuilder {
        FigureBuilder::new(TemplateConfig::new("/assets/watermark.png"))
    }

    fn grouped_metadata() -> StationMetadata {
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

    fn proximity_frame(distances: &[f64]) -> DataFrame {
        let ids: Vec<String> = (0..distances.len()).map(|i| format!("S{i}")).collect();
        let names: Vec<String> = (0..distances.len()).map(|i| format!("Station {i}")).collect();
        df!(
            COL_STATION_ID => ids,
            COL_STATION_NAME => names,
            COL_LATITUDE => vec![-6.2; distances.len()],
            COL_LONGITUDE => vec![106.8; distances.len()],
            COL_DISTANCE => distances.to_vec(),
        )
        .unwrap()
    }

    fn station_opacities(figure: &Figure) -> Vec<f64> {
        let Trace::ScatterMap(stations) = &figure.data[0] else {
            panic!("expected a map trace");
        };
        match &stations.marker.opacity {
            Some(Opacity::PerPoint(values)) => values.clone(),
            other => panic!("expected per-point opacity, got {other:?}"),
        }
    }

    #[test]
    fn one_layer_per_dataset_in_first_appearance_order() {
        let figure = builder()
            .figure_map_all_stations()
            .metadata(&grouped_metadata())
            .call()
            .unwrap();

        assert_eq!(figure.data.len(), 2);
        let Trace::ScatterMap(first) = &figure.data[0] else {
            panic!("expected a map trace");
        };
        let Trace::ScatterMap(second) = &figure.data[1] else {
            panic!("expected a map trace");
        };
        assert_eq!(first.name, "A");
        assert_eq!(first.lat.len(), 2);
        assert_eq!(second.name, "B");
        assert_eq!(second.lat.len(), 1);
        assert_eq!(second.text, ["Gamma"]);
        assert_eq!(second.custom_data, [serde_json::json!("S3")]);
    }

    #[test]
    fn overview_map_layout_is_fixed_on_the_service_area() {
        let figure = builder()
            .figure_map_all_stations()
            .metadata(&grouped_metadata())
            .call()
            .unwrap();

        let map = figure.layout.map.unwrap();
        assert_eq!(map.center.lat, -2.600029);
        assert_eq!(map.center.lon, 118.015776);
        assert_eq!(figure.layout.drag_mode, Some(DragMode::Disabled));
        assert_eq!(figure.layout.click_mode, Some(ClickMode::Event));
        assert_eq!(figure.layout.images.len(), 1);
        assert_eq!(figure.layout.images[0].layer, Layer::Above);
    }

    #[test]
    fn empty_metadata_yields_no_layers() {
        let df = df!(
            COL_STATION_ID => Vec::<String>::new(),
            COL_STATION_NAME => Vec::<String>::new(),
            COL_LATITUDE => Vec::<f64>::new(),
            COL_LONGITUDE => Vec::<f64>::new(),
            "title" => Vec::<String>::new(),
        )
        .unwrap();
        let metadata = StationMetadata::new(df).unwrap();
        let figure = builder()
            .figure_map_all_stations()
            .metadata(&metadata)
            .call()
            .unwrap();
        assert!(figure.data.is_empty());
    }

    #[test]
    fn single_station_is_fully_opaque_regardless_of_distance() {
        let figure = builder()
            .figure_map_coordinate()
            .point_coordinate("-6.2, 106.8")
            .name_coordinate("Site")
            .stations(&proximity_frame(&[123.456]))
            .call()
            .unwrap();
        assert_eq!(station_opacities(&figure), [1.0]);
    }

    #[test]
    fn two_station_opacities_scale_with_distance() {
        let figure = builder()
            .figure_map_coordinate()
            .point_coordinate("-6.2, 106.8")
            .name_coordinate("Site")
            .stations(&proximity_frame(&[10.0, 20.0]))
            .call()
            .unwrap();
        // Min-max bounds come from the two distances themselves: the 10 km
        // row lands on 0.4 and the 20 km row on 1.0.
        assert_eq!(station_opacities(&figure), [0.4, 1.0]);
    }

    #[test]
    fn scale_opacity_interpolates_between_bounds() {
        let scaled = scale_opacity(&[10.0, 15.0, 20.0]);
        assert_eq!(scaled[0], 0.4);
        assert!((scaled[1] - 0.7).abs() < 1e-12);
        assert_eq!(scaled[2], 1.0);
        assert_eq!(scale_opacity(&[]), Vec::<f64>::new());
        assert_eq!(scale_opacity(&[5.0, 5.0, 5.0]), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn proximity_map_centers_and_zooms_on_the_point() {
        let figure = builder()
            .figure_map_coordinate()
            .point_coordinate("-6.2, 106.8")
            .name_coordinate("Site")
            .stations(&proximity_frame(&[10.0, 20.0]))
            .call()
            .unwrap();

        let map = figure.layout.map.unwrap();
        assert_eq!(map.center.lat, -6.2);
        assert_eq!(map.center.lon, 106.8);
        assert_eq!(map.zoom, Some(9.5));

        let Trace::ScatterMap(point) = &figure.data[1] else {
            panic!("expected a map trace");
        };
        assert_eq!(point.name, "Site");
        assert_eq!(point.marker.size, Some(15));
        assert_eq!(point.lat, [-6.2]);
    }

    #[test]
    fn station_payload_pairs_id_with_distance() {
        let figure = builder()
            .figure_map_coordinate()
            .point_coordinate("-6.2, 106.8")
            .name_coordinate("Site")
            .stations(&proximity_frame(&[10.0, 20.0]))
            .call()
            .unwrap();
        let Trace::ScatterMap(stations) = &figure.data[0] else {
            panic!("expected a map trace");
        };
        assert_eq!(stations.custom_data[0], serde_json::json!(["S0", 10.0]));
        assert_eq!(stations.custom_data[1], serde_json::json!(["S1", 20.0]));
    }

    #[test]
    fn empty_station_table_still_builds_both_traces() {
        let figure = builder()
            .figure_map_coordinate()
            .point_coordinate("-6.2, 106.8")
            .name_coordinate("Site")
            .stations(&proximity_frame(&[]))
            .call()
            .unwrap();
        assert_eq!(figure.data.len(), 2);
        assert_eq!(station_opacities(&figure), Vec::<f64>::new());
    }

    #[test]
    fn invalid_coordinate_is_a_parse_error() {
        let err = builder()
            .figure_map_coordinate()
            .point_coordinate("somewhere")
            .name_coordinate("Site")
            .stations(&proximity_frame(&[10.0]))
            .call()
            .unwrap_err();
        assert!(matches!(err, RainvizError::Coordinate(_)));
    }
}
