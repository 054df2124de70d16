//! Read-only template configuration injected into the figure builder.
//!
//! The embedding application resolves these values once at process start
//! (from its own configuration source) and hands them over at
//! [`crate::FigureBuilder::new`]; nothing here is read from the
//! environment or from disk by this crate.

/// Branding template for built figures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    watermark_source: String,
}

impl TemplateConfig {
    /// Creates a template with the given watermark image reference
    /// (a URL or data URI understood by the rendering layer).
    pub fn new(watermark_source: impl Into<String>) -> Self {
        TemplateConfig {
            watermark_source: watermark_source.into(),
        }
    }

    pub fn watermark_source(&self) -> &str {
        &self.watermark_source
    }
}
