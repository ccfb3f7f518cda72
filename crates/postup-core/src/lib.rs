//! postup-core - content-node tree and HTML rendering
//!
//! This crate provides the document model produced by a rich-text
//! editing session and the fallback serializer that projects it to
//! HTML and plain text. It is used by `postup` (the composer service)
//! and `postup-feed` (the persisted feed).
//!
//! # Architecture
//!
//! ```text
//! Editing Surface ──▶ ┌──────────────────┐      ┌────────────────┐
//!                     │ ContentNode tree │ ───▶ │ html  +  text  │
//! Stored JSON ──────▶ │                  │      └────────────────┘
//!                     └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use postup_core::{ContentNode, RenderOptions, TextFormat, render};
//!
//! let tree = ContentNode::root(vec![
//!     ContentNode::heading(1, "Hello World"),
//!     ContentNode::paragraph(vec![
//!         ContentNode::plain_text("This is "),
//!         ContentNode::formatted_text("bold", TextFormat::bold()),
//!         ContentNode::plain_text(" text."),
//!     ]),
//! ]);
//!
//! let rendered = render(&tree, &RenderOptions::default());
//! assert_eq!(
//!     rendered.html,
//!     "<h1>Hello World</h1><p>This is <strong>bold</strong> text.</p>"
//! );
//! ```

mod ast;
mod options;
mod render;

pub use ast::{ContentNode, ListItem, PreviewKind, TextFormat};
pub use options::RenderOptions;
pub use render::{render, Rendered};
