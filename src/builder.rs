//! The main entry point for building dashboard figures.
//!
//! A [`FigureBuilder`] is constructed once from the application's
//! [`TemplateConfig`] and can then build any of the dashboard's figures.
//! Every build is an independent, synchronous, side-effect-free
//! transformation of its inputs into a fresh [`Figure`]; the builder holds
//! no mutable state, so one instance can be shared across threads.

use crate::config::TemplateConfig;
use crate::types::figure::Figure;
use crate::types::layout::{
    Anchor, Annotation, AxisOptions, Font, ImageOverlay, Layer, Layout, Margin, Title,
};
use crate::types::trace::{LineSeries, Trace};
use bon::bon;

/// Builds figure descriptions for the rainfall dashboard.
///
/// # Examples
///
/// ```
/// use rainviz::{FigureBuilder, TemplateConfig};
///
/// let builder = FigureBuilder::new(TemplateConfig::new("/assets/watermark.png"));
/// let placeholder = builder.figure_empty().text("No data available").call();
/// assert!(placeholder.data.len() == 1);
/// ```
#[derive(Debug, Clone)]
pub struct FigureBuilder {
    template: TemplateConfig,
}

#[bon]
impl FigureBuilder {
    /// Creates a builder using the given branding template.
    ///
    /// The template is resolved once at process start by the embedding
    /// application; the builder only reads it.
    pub fn new(template: TemplateConfig) -> Self {
        FigureBuilder { template }
    }

    pub fn template(&self) -> &TemplateConfig {
        &self.template
    }

    /// Builds the watermark overlay for one subplot.
    ///
    /// The overlay sits at the center of the subplot's domain, at half the
    /// domain's width and height, below the data and at low opacity.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.subplot(usize)`: Optional. The 1-based subplot index. Defaults
    ///   to `1`; the first subplot's axis references carry no numeric
    ///   suffix, matching the single-plot convention of the rendering
    ///   layer.
    ///
    /// # Examples
    ///
    /// ```
    /// use rainviz::{FigureBuilder, TemplateConfig};
    ///
    /// let builder = FigureBuilder::new(TemplateConfig::new("/assets/watermark.png"));
    ///
    /// let first = builder.generate_watermark().call();
    /// assert_eq!(first.x_ref, "x domain");
    ///
    /// let third = builder.generate_watermark().subplot(3).call();
    /// assert_eq!(third.x_ref, "x3 domain");
    /// assert_eq!(third.y_ref, "y3 domain");
    /// ```
    #[builder]
    pub fn generate_watermark(&self, subplot: Option<usize>) -> ImageOverlay {
        let subplot = subplot.unwrap_or(1);
        let suffix = if subplot == 1 {
            String::new()
        } else {
            subplot.to_string()
        };
        ImageOverlay {
            source: self.template.watermark_source().to_string(),
            x_ref: format!("x{suffix} domain"),
            y_ref: format!("y{suffix} domain"),
            x: 0.5,
            y: 0.5,
            size_x: 0.5,
            size_y: 0.5,
            x_anchor: Anchor::Center,
            y_anchor: Anchor::Middle,
            name: "watermark".to_string(),
            layer: Layer::Below,
            opacity: 0.2,
        }
    }

    /// Builds a placeholder figure with a centered caption and no data.
    ///
    /// Used by callers as a fallback when no data is available upstream;
    /// the builder itself performs no such check. Both axes are fully
    /// hidden and the caption renders italicized at low opacity near the
    /// bottom-center of the plot area.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.text(&str)`: Optional. The caption. Defaults to empty.
    /// * `.size(u32)`: Optional. Caption font size. Defaults to `40`.
    /// * `.margin_all(u32)`: Optional. Uniform margin. Defaults to `0`.
    /// * `.height(u32)`: Optional. Figure height. Defaults to `450`.
    #[builder]
    pub fn figure_empty(
        &self,
        text: Option<&str>,
        size: Option<u32>,
        margin_all: Option<u32>,
        height: Option<u32>,
    ) -> Figure {
        let text = text.unwrap_or("");
        let size = size.unwrap_or(40);
        let margin_all = margin_all.unwrap_or(0);
        let height = height.unwrap_or(450);

        let hidden_axis = || AxisOptions {
            title: Some(Title::from("")),
            show_grid: Some(false),
            show_tick_labels: Some(false),
            zero_line: Some(false),
            ..Default::default()
        };

        let layout = Layout {
            title: Some(Title {
                text: String::new(),
                x: Some(0.5),
            }),
            x_axis: Some(hidden_axis()),
            y_axis: Some(hidden_axis()),
            margin: Some(Margin::uniform(margin_all)),
            height: Some(height),
            annotations: vec![Annotation {
                name: "text".to_string(),
                text: format!("<i>{text}</i>"),
                opacity: 0.3,
                font: Font { size: Some(size) },
                x_ref: "x domain".to_string(),
                y_ref: "y domain".to_string(),
                x: 0.5,
                y: 0.05,
                show_arrow: false,
            }],
            ..Default::default()
        };

        Figure::new(vec![Trace::Line(LineSeries::default())], layout)
    }
}
