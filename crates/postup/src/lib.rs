//! # postup
//!
//! Compose rich-text posts into a persisted feed.
//!
//! The crate wires the content-node tree from an editing surface
//! through the HTML renderer into [`postup_feed`]'s ordered feed. The
//! host editor's own exporter stays the primary rendering path; the
//! built-in fallback takes over only when the exporter's output lacks
//! the custom leaf markers.
//!
//! ## Example
//!
//! ```rust
//! use postup::{Author, Composer, FeedStore, MemoryStorage};
//! use postup::tree::ContentNode;
//!
//! let composer = Composer::new(Author::new("Ada", "https://example.com/ada.png"));
//! let mut feed = FeedStore::new(MemoryStorage::new());
//!
//! let tree = ContentNode::root(vec![ContentNode::paragraph(vec![
//!     ContentNode::plain_text("Hello World"),
//! ])]);
//!
//! let post = composer.publish(&tree, &mut feed).unwrap();
//! assert_eq!(post.content, "Hello World");
//! assert_eq!(feed.len(), 1);
//! ```

mod composer;
mod exporter;
#[cfg(feature = "html")]
pub mod html;
pub mod markdown;
mod preview;
mod sync;

pub use composer::Composer;
pub use exporter::{has_custom_markers, HtmlExporter};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use preview::{resolve_preview, PreviewData};
pub use sync::{SyncChannel, SyncEvent};

pub use postup_core::{render, Rendered, RenderOptions};
pub use postup_feed::{
    Author, FeedStore, JsonFileStorage, MemoryStorage, Post, PostStorage, PostUpdate,
};

/// Content-node tree types, re-exported for callers building trees by
/// hand or deserializing stored editor state.
pub mod tree {
    pub use postup_core::{ContentNode, ListItem, PreviewKind, TextFormat};
}

/// Error type for composer operations
#[derive(Debug, thiserror::Error)]
pub enum ComposerError {
    /// The tree rendered to empty text with no image fragment.
    #[error("nothing to post")]
    NothingToPost,

    #[error(transparent)]
    Feed(#[from] postup_feed::FeedError),
}

pub type Result<T> = std::result::Result<T, ComposerError>;
