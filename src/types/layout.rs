//! Layout descriptors: the non-data settings of a figure.
//!
//! Options are grouped by concern (title, axis, legend, margin, map view,
//! annotations, overlay images) into structs with named fields instead of
//! the loose option dictionaries the plotting layer accepts. Unset options
//! are skipped during serialization so the rendered JSON only carries what
//! a builder decided.

use serde::ser::Serializer;
use serde::Serialize;

/// Non-data figure settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(rename = "xaxis", skip_serializing_if = "Option::is_none")]
    pub x_axis: Option<AxisOptions>,
    #[serde(rename = "yaxis", skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<AxisOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(rename = "showlegend", skip_serializing_if = "Option::is_none")]
    pub show_legend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendOptions>,
    #[serde(rename = "clickmode", skip_serializing_if = "Option::is_none")]
    pub click_mode: Option<ClickMode>,
    #[serde(rename = "dragmode", skip_serializing_if = "Option::is_none")]
    pub drag_mode: Option<DragMode>,
    #[serde(rename = "hovermode", skip_serializing_if = "Option::is_none")]
    pub hover_mode: Option<HoverMode>,
    #[serde(rename = "barmode", skip_serializing_if = "Option::is_none")]
    pub bar_mode: Option<BarMode>,
    #[serde(rename = "bargap", skip_serializing_if = "Option::is_none")]
    pub bar_gap: Option<f64>,
    #[serde(rename = "mapbox", skip_serializing_if = "Option::is_none")]
    pub map: Option<MapOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageOverlay>,
}

/// A title slot for the figure, an axis or a legend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Title {
            text: text.to_string(),
            x: None,
        }
    }
}

impl From<String> for Title {
    fn from(text: String) -> Self {
        Title { text, x: None }
    }
}

/// Per-axis display options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AxisOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(rename = "showgrid", skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,
    #[serde(rename = "showticklabels", skip_serializing_if = "Option::is_none")]
    pub show_tick_labels: Option<bool>,
    #[serde(rename = "zeroline", skip_serializing_if = "Option::is_none")]
    pub zero_line: Option<bool>,
    #[serde(rename = "showspikes", skip_serializing_if = "Option::is_none")]
    pub show_spikes: Option<bool>,
    /// Disables zooming along this axis when set.
    #[serde(rename = "fixedrange", skip_serializing_if = "Option::is_none")]
    pub fixed_range: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    #[serde(rename = "tickvals", skip_serializing_if = "Option::is_none")]
    pub tick_values: Option<Vec<String>>,
    #[serde(rename = "ticktext", skip_serializing_if = "Option::is_none")]
    pub tick_text: Option<Vec<String>>,
}

/// Figure margins in pixels.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Margin {
    pub t: u32,
    pub l: u32,
    pub r: u32,
    pub b: u32,
}

impl Margin {
    /// The same margin on all four sides.
    pub fn uniform(value: u32) -> Self {
        Margin {
            t: value,
            l: value,
            r: value,
            b: value,
        }
    }

    /// Zero on all sides except the top.
    pub fn top_only(top: u32) -> Self {
        Margin {
            t: top,
            l: 0,
            r: 0,
            b: 0,
        }
    }
}

/// Legend placement and styling.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LegendOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
    #[serde(rename = "xanchor", skip_serializing_if = "Option::is_none")]
    pub x_anchor: Option<Anchor>,
    #[serde(rename = "yanchor", skip_serializing_if = "Option::is_none")]
    pub y_anchor: Option<Anchor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(rename = "bgcolor", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(rename = "itemsizing", skip_serializing_if = "Option::is_none")]
    pub item_sizing: Option<ItemSizing>,
}

/// Map view: where the camera sits and how far it is zoomed in.
#[derive(Debug, Clone, Serialize)]
pub struct MapOptions {
    pub center: MapCenter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

/// Center coordinate of the map view.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MapCenter {
    pub lat: f64,
    pub lon: f64,
}

/// A free-floating text annotation.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub name: String,
    pub text: String,
    pub opacity: f64,
    pub font: Font,
    #[serde(rename = "xref")]
    pub x_ref: String,
    #[serde(rename = "yref")]
    pub y_ref: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "showarrow")]
    pub show_arrow: bool,
}

/// Font settings for annotations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Font {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

/// An image overlaid on the figure, non-interactive.
#[derive(Debug, Clone, Serialize)]
pub struct ImageOverlay {
    pub source: String,
    #[serde(rename = "xref")]
    pub x_ref: String,
    #[serde(rename = "yref")]
    pub y_ref: String,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "sizex")]
    pub size_x: f64,
    #[serde(rename = "sizey")]
    pub size_y: f64,
    #[serde(rename = "xanchor")]
    pub x_anchor: Anchor,
    #[serde(rename = "yanchor")]
    pub y_anchor: Anchor,
    pub name: String,
    pub layer: Layer,
    pub opacity: f64,
}

/// Anchor point for overlays and legends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Whether an overlay renders above or below the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Above,
    Below,
}

/// Legend orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Serialize for Orientation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Orientation::Horizontal => serializer.serialize_str("h"),
            Orientation::Vertical => serializer.serialize_str("v"),
        }
    }
}

/// How legend item glyphs are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSizing {
    Constant,
    Trace,
}

/// Which pointer events the figure emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickMode {
    Event,
    Select,
}

/// Pointer drag behavior. `Disabled` serializes to `false`, which is how
/// the plotting layer spells "no drag interaction at all".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Zoom,
    Pan,
    Disabled,
}

impl Serialize for DragMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DragMode::Zoom => serializer.serialize_str("zoom"),
            DragMode::Pan => serializer.serialize_str("pan"),
            DragMode::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// How hover labels pick their target points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverMode {
    X,
    Y,
    Closest,
}

/// How multiple bar traces combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BarMode {
    Stack,
    Group,
    Overlay,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn disabled_drag_serializes_to_false() {
        assert_eq!(
            serde_json::to_value(DragMode::Disabled).unwrap(),
            json!(false)
        );
        assert_eq!(serde_json::to_value(DragMode::Zoom).unwrap(), json!("zoom"));
    }

    #[test]
    fn layout_skips_unset_options() {
        let layout = Layout {
            height: Some(450),
            ..Default::default()
        };
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["height"], 450);
        assert!(value.get("xaxis").is_none());
        assert!(value.get("legend").is_none());
        assert!(value.get("annotations").is_none());
    }

    #[test]
    fn layout_renames_to_schema_keys() {
        let layout = Layout {
            show_legend: Some(true),
            click_mode: Some(ClickMode::Event),
            drag_mode: Some(DragMode::Disabled),
            bar_mode: Some(BarMode::Stack),
            bar_gap: Some(0.0),
            map: Some(MapOptions {
                center: MapCenter {
                    lat: -2.6,
                    lon: 118.0,
                },
                zoom: Some(9.5),
            }),
            ..Default::default()
        };
        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["showlegend"], true);
        assert_eq!(value["clickmode"], "event");
        assert_eq!(value["dragmode"], false);
        assert_eq!(value["barmode"], "stack");
        assert_eq!(value["bargap"], 0.0);
        assert_eq!(value["mapbox"]["zoom"], 9.5);
        assert_eq!(value["mapbox"]["center"]["lat"], -2.6);
    }

    #[test]
    fn legend_anchors_serialize_lowercase() {
        let legend = LegendOptions {
            orientation: Some(Orientation::Horizontal),
            x_anchor: Some(Anchor::Left),
            y_anchor: Some(Anchor::Top),
            item_sizing: Some(ItemSizing::Constant),
            ..Default::default()
        };
        let value = serde_json::to_value(&legend).unwrap();
        assert_eq!(value["orientation"], "h");
        assert_eq!(value["xanchor"], "left");
        assert_eq!(value["yanchor"], "top");
        assert_eq!(value["itemsizing"], "constant");
    }
}
