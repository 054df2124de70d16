//! Figure builders for a rainfall station monitoring dashboard.
//!
//! Each builder maps tabular station metadata and time-series measurements
//! into a declarative [`Figure`] description (traces + layout) for the
//! downstream rendering layer. Nothing here renders, persists or performs
//! I/O.

mod builder;
mod config;
mod coordinate;
mod distance;
mod error;
mod figures;
mod frames;
mod metadata;
mod types;

pub use builder::FigureBuilder;
pub use config::TemplateConfig;
pub use coordinate::{CoordinateError, LatLon};
pub use error::RainvizError;
pub use figures::error::FigureError;
pub use frames::{COL_DATE, COL_DISTANCE};
pub use metadata::{
    MetadataError, StationMetadata, COL_LATITUDE, COL_LONGITUDE, COL_STATION_ID, COL_STATION_NAME,
    COL_TITLE,
};

pub use types::figure::Figure;
pub use types::layout::{
    Anchor, Annotation, AxisOptions, BarMode, ClickMode, DragMode, Font, HoverMode, ImageOverlay,
    ItemSizing, Layer, Layout, LegendOptions, MapCenter, MapOptions, Margin, Orientation, Title,
};
pub use types::trace::{
    BarSeries, HeatGrid, LineSeries, Marker, MarkerLine, Mode, Opacity, ScatterMap, Trace, Visible,
};
