//! Exporter port
//!
//! The host editing framework usually serializes the tree itself. Its
//! generic exporter cannot know about the two custom leaf kinds, so
//! the output is probed for their markers before being trusted.

use postup_core::{ContentNode, RenderOptions};

/// The editing framework's native tree-to-HTML exporter.
///
/// `export` returns `None` when the host provides no exporter for the
/// given tree; the composer then renders through the fallback path
/// unconditionally.
pub trait HtmlExporter {
    fn export(&self, root: &ContentNode) -> Option<String>;
}

impl<F> HtmlExporter for F
where
    F: Fn(&ContentNode) -> Option<String>,
{
    fn export(&self, root: &ContentNode) -> Option<String> {
        self(root)
    }
}

/// Check whether exported HTML already carries the custom leaf
/// markers: an `<img` tag for images, or the preview card class for
/// link previews.
pub fn has_custom_markers(html: &str, options: &RenderOptions) -> bool {
    html.contains("<img") || html.contains(options.preview_card_class.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_img_tag_counts_as_marker() {
        let options = RenderOptions::default();
        assert!(has_custom_markers("<p><img src=\"x\" /></p>", &options));
    }

    #[test]
    fn test_preview_card_class_counts_as_marker() {
        let options = RenderOptions::default();
        assert!(has_custom_markers(
            "<div class=\"link-preview-card\">…</div>",
            &options
        ));
    }

    #[test]
    fn test_plain_markup_has_no_markers() {
        let options = RenderOptions::default();
        assert!(!has_custom_markers("<p>just text</p>", &options));
    }
}
