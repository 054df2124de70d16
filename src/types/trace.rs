//! Trace descriptors: the renderable data series of a figure.
//!
//! Each variant of [`Trace`] maps to one trace type of the downstream
//! plotting layer and serializes to that layer's JSON schema, key for key
//! (`type`, `customdata`, `hovertemplate`, ...). Traces are plain data:
//! constructed once by a figure builder, never mutated afterwards.

use serde::ser::Serializer;
use serde::Serialize;
use serde_json::Value;

/// One renderable data series within a figure.
///
/// The serialized form carries the trace kind in a `type` field, as the
/// plotting layer expects (`scattermapbox`, `heatmap`, `bar`, `scatter`).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Trace {
    /// Points on a geographic map.
    #[serde(rename = "scattermapbox")]
    ScatterMap(ScatterMap),
    /// A grid of colored cells.
    #[serde(rename = "heatmap")]
    HeatGrid(HeatGrid),
    /// One bar series.
    #[serde(rename = "bar")]
    Bar(BarSeries),
    /// One line (or marker) series on cartesian axes.
    #[serde(rename = "scatter")]
    Line(LineSeries),
}

/// A point layer on a geographic map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScatterMap {
    pub lat: Vec<f64>,
    pub lon: Vec<f64>,
    /// Per-point label text.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    /// Per-point payload, available to click handlers and templates.
    #[serde(rename = "customdata", skip_serializing_if = "Vec::is_empty")]
    pub custom_data: Vec<Value>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    pub marker: Marker,
    #[serde(rename = "textposition", skip_serializing_if = "Option::is_none")]
    pub text_position: Option<String>,
    #[serde(rename = "texttemplate", skip_serializing_if = "Option::is_none")]
    pub text_template: Option<String>,
    #[serde(rename = "hovertemplate", skip_serializing_if = "Option::is_none")]
    pub hover_template: Option<String>,
}

/// A grid of colored cells spanning `x` (columns) by `y` (rows).
///
/// `z` holds one row per entry in `y`; `None` cells render as gaps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HeatGrid {
    pub z: Vec<Vec<Option<f64>>>,
    pub x: Vec<String>,
    pub y: Vec<String>,
    #[serde(rename = "zmin")]
    pub z_min: f64,
    #[serde(rename = "zmax")]
    pub z_max: f64,
    /// Per-cell payload, same shape as `z`.
    #[serde(rename = "customdata", skip_serializing_if = "Vec::is_empty")]
    pub custom_data: Vec<Vec<String>>,
    #[serde(rename = "hovertemplate", skip_serializing_if = "Option::is_none")]
    pub hover_template: Option<String>,
}

/// One bar series over categorical `x` labels.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BarSeries {
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub marker: Marker,
    #[serde(rename = "hovertemplate", skip_serializing_if = "Option::is_none")]
    pub hover_template: Option<String>,
    #[serde(rename = "hoverinfo", skip_serializing_if = "Option::is_none")]
    pub hover_info: Option<String>,
    /// Sort key within the legend; higher ranks sink to the bottom.
    #[serde(rename = "legendrank", skip_serializing_if = "Option::is_none")]
    pub legend_rank: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<Visible>,
}

/// One line series over `x` labels; `None` values render as gaps.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LineSeries {
    pub x: Vec<String>,
    pub y: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
}

/// Marker styling shared by map and bar traces.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<Opacity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

/// Outline of a marker or bar.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkerLine {
    pub width: u32,
}

/// Marker opacity: one value for the whole trace, or one per point.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Opacity {
    Uniform(f64),
    PerPoint(Vec<f64>),
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "markers+text")]
    MarkersText,
}

/// Trace visibility. `LegendOnly` hides the series until the user enables
/// it through the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visible {
    Shown,
    Hidden,
    LegendOnly,
}

impl Serialize for Visible {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Visible::Shown => serializer.serialize_bool(true),
            Visible::Hidden => serializer.serialize_bool(false),
            Visible::LegendOnly => serializer.serialize_str("legendonly"),
        }
    }
}
