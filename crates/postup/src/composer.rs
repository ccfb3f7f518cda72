//! Composer - the main entry point for publishing posts.

use postup_core::{render, ContentNode, Rendered, RenderOptions};
use postup_feed::{Author, FeedStore, Post, PostStorage};
use tracing::debug;

use crate::exporter::{has_custom_markers, HtmlExporter};
use crate::{ComposerError, Result};

/// Text stored for a post whose tree renders images but no words.
const IMAGE_ONLY_PLACEHOLDER: &str = "Image post";

/// The composing service: renders a snapshot of the editing surface's
/// tree and turns it into a whole [`Post`] record.
///
/// Callers must read the tree under the editing surface's own
/// read-consistency guarantee before handing it over; the composer
/// never touches a live tree.
pub struct Composer {
    options: RenderOptions,
    author: Author,
    exporter: Option<Box<dyn HtmlExporter>>,
}

impl Composer {
    /// Create a composer with default render options and no native
    /// exporter.
    pub fn new(author: Author) -> Self {
        Self {
            options: RenderOptions::default(),
            author,
            exporter: None,
        }
    }

    /// Create a composer with custom render options.
    pub fn with_options(author: Author, options: RenderOptions) -> Self {
        Self {
            options,
            author,
            exporter: None,
        }
    }

    /// Attach the host editor's native exporter.
    pub fn with_exporter(mut self, exporter: impl HtmlExporter + 'static) -> Self {
        self.exporter = Some(Box::new(exporter));
        self
    }

    /// Get the current options
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    /// Render a tree to HTML and plain text.
    ///
    /// The native exporter's output wins when it already contains the
    /// custom leaf markers. Otherwise the fallback renderer runs; when
    /// even the fallback produces no fragments, the exporter's output
    /// is kept as-is.
    pub fn render(&self, root: &ContentNode) -> Rendered {
        let Some(native) = self.exporter.as_ref().and_then(|e| e.export(root)) else {
            return render(root, &self.options);
        };

        if has_custom_markers(&native, &self.options) {
            return Rendered {
                html: native,
                text: root.text_content(),
            };
        }

        let fallback = render(root, &self.options);
        if fallback.html.is_empty() {
            return Rendered {
                html: native,
                text: fallback.text,
            };
        }
        fallback
    }

    /// Build a whole post from a tree snapshot.
    ///
    /// A tree that renders to blank text is nothing to post, unless an
    /// image fragment is present, in which case the post proceeds with
    /// placeholder text.
    pub fn compose(&self, root: &ContentNode) -> Result<Post> {
        let Rendered { html, text } = self.render(root);

        if text.trim().is_empty() && !html.contains("<img") {
            return Err(ComposerError::NothingToPost);
        }

        let content = if text.is_empty() {
            IMAGE_ONLY_PLACEHOLDER.to_string()
        } else {
            text
        };

        let post = Post::new(content, html, root.clone(), self.author.clone());
        debug!(id = %post.id, "post composed");
        Ok(post)
    }

    /// Compose and insert at the front of the feed in one step.
    pub fn publish<S: PostStorage>(
        &self,
        root: &ContentNode,
        feed: &mut FeedStore<S>,
    ) -> Result<Post> {
        let post = self.compose(root)?;
        feed.add(post.clone())?;
        debug!(id = %post.id, "post published");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postup_feed::MemoryStorage;

    fn composer() -> Composer {
        Composer::new(Author::new("Ada", "https://example.com/ada.png"))
    }

    fn text_tree(text: &str) -> ContentNode {
        ContentNode::root(vec![ContentNode::paragraph(vec![
            ContentNode::plain_text(text),
        ])])
    }

    #[test]
    fn test_compose_plain_text_post() {
        let post = composer().compose(&text_tree("Hello World")).unwrap();
        assert_eq!(post.content, "Hello World");
        assert_eq!(post.html_content, "<p>Hello World</p>");
        assert_eq!(post.likes, 0);
    }

    #[test]
    fn test_compose_rejects_empty_tree() {
        let tree = ContentNode::root(vec![ContentNode::paragraph(vec![])]);
        let result = composer().compose(&tree);
        assert!(matches!(result, Err(ComposerError::NothingToPost)));
    }

    #[test]
    fn test_image_only_post_gets_placeholder_text() {
        let tree = ContentNode::root(vec![ContentNode::image("photo.png")]);
        let post = composer().compose(&tree).unwrap();
        assert_eq!(post.content, "Image post");
        assert!(post.html_content.contains("<img"));
    }

    #[test]
    fn test_native_output_with_markers_wins() {
        let composer = composer()
            .with_exporter(|_: &ContentNode| Some("<p><img src=\"native.png\" /></p>".to_string()));
        let tree = ContentNode::root(vec![ContentNode::image("ignored.png")]);
        let rendered = composer.render(&tree);
        assert_eq!(rendered.html, "<p><img src=\"native.png\" /></p>");
    }

    #[test]
    fn test_fallback_replaces_markerless_native_output() {
        let composer =
            composer().with_exporter(|_: &ContentNode| Some("<p>no markers here</p>".to_string()));
        let tree = ContentNode::root(vec![ContentNode::image("photo.png")]);
        let rendered = composer.render(&tree);
        assert!(rendered.html.starts_with("<img src=\"photo.png\""));
    }

    #[test]
    fn test_markerless_native_output_kept_when_fallback_is_empty() {
        let composer =
            composer().with_exporter(|_: &ContentNode| Some("<hr />".to_string()));
        let tree = ContentNode::root(vec![]);
        let rendered = composer.render(&tree);
        assert_eq!(rendered.html, "<hr />");
    }

    #[test]
    fn test_publish_inserts_into_feed() {
        let mut feed = FeedStore::new(MemoryStorage::new());
        let post = composer()
            .publish(&text_tree("published"), &mut feed)
            .unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed.get(post.id).unwrap().content, "published");
    }

    #[test]
    fn test_whitespace_text_with_image_publishes() {
        let tree = ContentNode::root(vec![
            ContentNode::paragraph(vec![ContentNode::plain_text("  ")]),
            ContentNode::image("photo.png"),
        ]);
        let post = composer().compose(&tree).unwrap();
        // Untrimmed text is kept verbatim once the image rescues the post.
        assert_eq!(post.content, "  ");
    }
}
