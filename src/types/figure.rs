//! The composite figure description handed off to the rendering layer.

use crate::types::layout::Layout;
use crate::types::trace::Trace;
use serde::Serialize;

/// A complete figure: an ordered sequence of traces plus a layout.
///
/// Figures are freshly constructed by the builder operations and never
/// mutated afterwards; the crate does not render or persist them. The
/// serialized form matches the JSON the plotting layer consumes, so a
/// figure can be embedded in a page or shipped over the wire as-is.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(data: Vec<Trace>, layout: Layout) -> Self {
        Figure { data, layout }
    }

    /// Serializes the figure into the plotting layer's JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
