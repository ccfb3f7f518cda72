//! Configuration options for HTML rendering

/// Options for the fallback HTML renderer.
///
/// Defaults reproduce the markup the editing surface's own theme
/// expects; override them to target a different stylesheet.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// CSS class applied to rendered links
    pub link_class: String,

    /// CSS class applied to inline code spans
    pub code_class: String,

    /// CSS class applied to link preview cards
    pub preview_card_class: String,

    /// Edge length in pixels of the preview card thumbnail
    pub preview_thumb: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            link_class: "prose-link".to_string(),
            code_class: "prose-code".to_string(),
            preview_card_class: "link-preview-card".to_string(),
            preview_thumb: 40,
        }
    }
}
